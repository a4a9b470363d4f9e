use std::fs;
use std::path::Path;

use nutrafuel_core::landing::generate_landing_page;

use crate::commands::{CommandResult, EXIT_IO};

pub fn run(query: &str, out: Option<&Path>) -> CommandResult {
    let html = match generate_landing_page(query) {
        Ok(html) => html,
        Err(error) => {
            return CommandResult::failure("landing", "render", error.to_string(), EXIT_IO)
        }
    };

    let Some(path) = out else {
        return CommandResult::text(html);
    };

    match fs::write(path, &html) {
        Ok(()) => {
            tracing::info!(
                event_name = "cli.landing.written",
                path = %path.display(),
                bytes = html.len(),
                "landing page preview written"
            );
            CommandResult::success(
                "landing",
                format!("wrote {} bytes to {}", html.len(), path.display()),
            )
        }
        Err(error) => CommandResult::failure(
            "landing",
            "io",
            format!("failed to write {}: {error}", path.display()),
            EXIT_IO,
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;
    use tempfile::tempdir;

    use super::run;

    #[test]
    fn prints_html_to_stdout_by_default() {
        let result = run("collagen for women over 40", None);

        assert_eq!(result.exit_code, 0);
        assert!(result.output.starts_with("<"));
        assert!(result.output.contains("Elite Collagen Matrix"));
    }

    #[test]
    fn writes_html_to_requested_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("preview.html");

        let result = run("protein launch", Some(&path));
        let payload: Value = serde_json::from_str(&result.output).expect("json output");

        assert_eq!(payload["status"], "ok");
        let html = fs::read_to_string(&path).expect("written file");
        assert!(html.contains("Elite Whey Isolate"));
    }

    #[test]
    fn unwritable_destination_is_an_io_failure() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("preview.html");

        let result = run("anything", Some(&path));

        assert_eq!(result.exit_code, 5);
        assert!(result.output.contains("\"error_class\":\"io\""));
    }
}
