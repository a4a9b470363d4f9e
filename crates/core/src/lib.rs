pub mod catalog;
pub mod charts;
pub mod config;
pub mod domain;
pub mod errors;
pub mod landing;
pub mod routing;

pub use catalog::{Catalog, CATEGORIES};
pub use charts::{bar_heights, chart_for_agent, ChartPayload, ChartType, ExportError};
pub use domain::agent::{AgentId, AgentProfile, AgentTier};
pub use domain::cart::{Cart, CartAction, CartItem, MAX_LINE_QUANTITY};
pub use domain::message::{Message, Role, Transcript};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, InterfaceError};
pub use landing::{generate_landing_page, LandingError};
pub use routing::{route, route_with_artifacts, Action, Response, Routed};
