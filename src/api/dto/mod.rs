pub mod auth;
pub mod cards;
pub mod certificates;
pub mod common;
pub mod facial;
pub mod humans;
pub mod relationships;
pub mod skills;
pub mod space_time;
pub mod specialities;
pub mod validation;
