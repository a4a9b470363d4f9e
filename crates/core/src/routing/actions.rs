use serde::{Deserialize, Serialize};

pub const LANDING_ACTIONS_BLOCK: &str = "\n\n---\n\n**[Preview Landing Page] [Generate HTML]**";
pub const CHART_ACTIONS_BLOCK: &str = "\n\n---\n\n**[View Chart] [Download Data]**";

/// Follow-up affordances attached to an assistant reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    PreviewLandingPage,
    GenerateHtml,
    ViewChart,
    DownloadData,
}

impl Action {
    pub const ALL: [Action; 4] =
        [Self::PreviewLandingPage, Self::GenerateHtml, Self::ViewChart, Self::DownloadData];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PreviewLandingPage => "Preview Landing Page",
            Self::GenerateHtml => "Generate HTML",
            Self::ViewChart => "View Chart",
            Self::DownloadData => "Download Data",
        }
    }

    fn marker(&self) -> String {
        format!("[{}]", self.label())
    }

    /// Recovers actions from text carrying the bracketed markers.
    pub fn detect(text: &str) -> Vec<Action> {
        Self::ALL.into_iter().filter(|action| text.contains(&action.marker())).collect()
    }
}

/// Appends the bracketed action blocks for `actions`, landing page block first.
pub fn render_with_sentinels(text: &str, actions: &[Action]) -> String {
    let mut rendered = text.to_string();
    let has = |wanted: [Action; 2]| wanted.iter().any(|action| actions.contains(action));
    if has([Action::PreviewLandingPage, Action::GenerateHtml]) {
        rendered.push_str(LANDING_ACTIONS_BLOCK);
    }
    if has([Action::ViewChart, Action::DownloadData]) {
        rendered.push_str(CHART_ACTIONS_BLOCK);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::{render_with_sentinels, Action, CHART_ACTIONS_BLOCK, LANDING_ACTIONS_BLOCK};

    #[test]
    fn renders_blocks_in_dashboard_order() {
        let text = render_with_sentinels(
            "body",
            &[Action::ViewChart, Action::DownloadData, Action::PreviewLandingPage],
        );
        assert_eq!(text, format!("body{LANDING_ACTIONS_BLOCK}{CHART_ACTIONS_BLOCK}"));
    }

    #[test]
    fn no_actions_leaves_text_untouched() {
        assert_eq!(render_with_sentinels("plain", &[]), "plain");
    }

    #[test]
    fn detect_reads_markers_back() {
        let text = render_with_sentinels("chart", &[Action::ViewChart, Action::DownloadData]);
        assert_eq!(Action::detect(&text), vec![Action::ViewChart, Action::DownloadData]);
        assert!(Action::detect("no markers here").is_empty());
    }
}
