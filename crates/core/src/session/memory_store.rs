use std::sync::{Mutex, PoisonError};

use super::{SessionError, SessionIdentifiers, SessionStore};

/// In-process session store, used when nothing needs to survive a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    cookie: Mutex<Option<SessionIdentifiers>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionIdentifiers>, SessionError> {
        Ok(self
            .cookie
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, identifiers: &SessionIdentifiers) -> Result<(), SessionError> {
        *self.cookie.lock().unwrap_or_else(PoisonError::into_inner) = Some(identifiers.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.cookie.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_clear() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        let ids = SessionIdentifiers {
            queue: "q".to_string(),
            ticket: "t".to_string(),
            ticket_number: "1".to_string(),
        };
        store.save(&ids).unwrap();
        assert_eq!(store.load().unwrap(), Some(ids));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
