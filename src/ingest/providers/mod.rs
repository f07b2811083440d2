pub mod fixture;
pub mod sofascore;
