use serde::{Deserialize, Serialize};

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Adoptable animals
    #[default]
    User,
    /// Management table, add form and charts
    Admin,
}

/// How far the operator has got through the admin gate this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessState {
    #[default]
    User,
    /// Admin requested; waiting for the code challenge
    AdminLocked,
    /// Code accepted; no further challenge this session
    AdminUnlocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessAction {
    RequestAdmin,
    /// Answer to the code challenge; `None` when the prompt was cancelled
    ChallengeAnswered(Option<String>),
    RequestUser,
}

/// View/access state for one session. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub view: View,
    pub access: AccessState,
}

impl Session {
    pub fn is_admin_view(&self) -> bool {
        self.view == View::Admin && self.access == AccessState::AdminUnlocked
    }

    pub fn is_unlocked(&self) -> bool {
        self.access == AccessState::AdminUnlocked
    }

    /// Apply one action. Pure: the unlock code is passed in.
    pub fn reduce(self, action: AccessAction, unlock_code: &str) -> Session {
        match (self.access, action) {
            (AccessState::AdminLocked, AccessAction::RequestUser) => Session {
                view: View::User,
                access: AccessState::User,
            },
            (_, AccessAction::RequestUser) => Session {
                view: View::User,
                ..self
            },
            (AccessState::AdminUnlocked, AccessAction::RequestAdmin) => Session {
                view: View::Admin,
                ..self
            },
            (_, AccessAction::RequestAdmin) => Session {
                access: AccessState::AdminLocked,
                ..self
            },
            (AccessState::AdminLocked, AccessAction::ChallengeAnswered(Some(code)))
                if code == unlock_code =>
            {
                Session {
                    view: View::Admin,
                    access: AccessState::AdminUnlocked,
                }
            }
            (AccessState::AdminLocked, AccessAction::ChallengeAnswered(_)) => Session {
                access: AccessState::User,
                ..self
            },
            // An answer nobody asked for changes nothing
            (_, AccessAction::ChallengeAnswered(_)) => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "123123";

    fn locked() -> Session {
        Session::default().reduce(AccessAction::RequestAdmin, CODE)
    }

    #[test]
    fn test_initial_state() {
        let session = Session::default();
        assert_eq!(session.view, View::User);
        assert_eq!(session.access, AccessState::User);
        assert!(!session.is_admin_view());
    }

    #[test]
    fn test_request_admin_locks() {
        let session = locked();
        assert_eq!(session.access, AccessState::AdminLocked);
        assert_eq!(session.view, View::User);
    }

    #[test]
    fn test_correct_code_unlocks() {
        let session = locked().reduce(AccessAction::ChallengeAnswered(Some(CODE.into())), CODE);
        assert_eq!(session.access, AccessState::AdminUnlocked);
        assert!(session.is_admin_view());
    }

    #[test]
    fn test_wrong_or_cancelled_code_returns_to_user() {
        for answer in [Some("000000".to_string()), Some(String::new()), None] {
            let session = locked().reduce(AccessAction::ChallengeAnswered(answer), CODE);
            assert_eq!(session.access, AccessState::User);
            assert_eq!(session.view, View::User);
        }
    }

    #[test]
    fn test_code_match_is_exact() {
        let session = locked().reduce(AccessAction::ChallengeAnswered(Some(" 123123".into())), CODE);
        assert_eq!(session.access, AccessState::User);
    }

    #[test]
    fn test_user_view_keeps_unlock() {
        let unlocked =
            locked().reduce(AccessAction::ChallengeAnswered(Some(CODE.into())), CODE);
        let user = unlocked.reduce(AccessAction::RequestUser, CODE);
        assert_eq!(user.view, View::User);
        assert_eq!(user.access, AccessState::AdminUnlocked);

        let admin = user.reduce(AccessAction::RequestAdmin, CODE);
        assert!(admin.is_admin_view());
    }

    #[test]
    fn test_stray_answer_ignored() {
        let session = Session::default();
        assert_eq!(
            session.reduce(AccessAction::ChallengeAnswered(Some(CODE.into())), CODE),
            session
        );
    }
}
