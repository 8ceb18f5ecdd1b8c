pub mod export;
pub mod run;
pub mod validate;
