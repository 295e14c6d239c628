mod adventure;
mod community;
mod contact;
mod content;
mod countries;
mod destination;
mod fetch;
mod geo;
mod geocode;
mod images;
mod login;
mod notes;
mod plan_trip;
mod planner;
mod route;
mod runner;
mod search;
mod store;

pub use adventure::*;
pub use community::*;
pub use contact::*;
pub use content::*;
pub use countries::*;
pub use destination::*;
pub use fetch::*;
pub use geo::*;
pub use geocode::*;
pub use images::*;
pub use login::*;
pub use notes::*;
pub use plan_trip::*;
pub use planner::*;
pub use route::*;
pub use runner::*;
pub use search::*;
pub use store::*;
