pub mod assets;
pub mod inputs;
pub mod reports;

pub use assets::TesterAssets;
pub use inputs::{parse_picks, parse_teams, split_csv};
pub use reports::Report;
