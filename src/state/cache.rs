use crate::boxscore::Fragment;
use std::collections::HashMap;

/// Last successfully rendered box score per game. Entries live as long as the
/// app does; a failed fetch never touches them.
#[derive(Debug, Default)]
pub struct BoxScoreCache {
    entries: HashMap<String, Fragment>,
}

impl BoxScoreCache {
    pub fn get(&self, game_id: &str) -> Option<&Fragment> {
        self.entries.get(game_id)
    }

    pub fn set(&mut self, game_id: &str, fragment: Fragment) {
        self.entries.insert(game_id.to_owned(), fragment);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
