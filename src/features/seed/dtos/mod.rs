mod seed_dto;

pub use seed_dto::SeedResultDto;
