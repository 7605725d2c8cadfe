pub mod boxscore;
pub mod game_panel;
