//! Finding a Carrefour jeunesse-emploi: by position (haversine over the
//! fixed office list) or by city / postal code through a collaborator.

pub mod geo;
pub mod geolocation;
pub mod handlers;
pub mod offices;
pub mod prompts;
pub mod resolver;
