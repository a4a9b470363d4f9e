pub mod actions;
pub mod matcher;
pub mod router;
pub mod templates;

pub use actions::{render_with_sentinels, Action};
pub use matcher::{match_variant, rules_for, Variant};
pub use router::{attach_artifacts, route, route_with_artifacts, Response, Routed, Source};
pub use templates::display_name;
