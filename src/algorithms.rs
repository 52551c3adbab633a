pub mod path_resolver;

pub use path_resolver::{resolve_route, NoRouteReason, ResolvedRoute, RouteOutcome};
