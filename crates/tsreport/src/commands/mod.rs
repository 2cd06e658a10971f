pub mod provenance;
pub mod run;
pub mod variants;
