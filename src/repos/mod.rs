pub mod card_repo;
pub mod certificate_repo;
pub mod error;
pub mod facial_repo;
pub mod human_repo;
pub mod relationship_repo;
pub mod skill_repo;
pub mod space_time_repo;
pub mod speciality_repo;
pub mod user_repo;
