use async_trait::async_trait;
use std::sync::Arc;

use crate::core::config::AccessConfig;
use crate::core::error::{AppError, Result};
use crate::features::access::session::{AccessAction, AccessState, Session, View};
use crate::shared::constants::{CHALLENGE_PROMPT, INCORRECT_CODE_MESSAGE};

/// Asks the operator for the admin code. `None` means the prompt was cancelled.
#[async_trait]
pub trait Challenge: Send + Sync {
    async fn challenge(&self, prompt: &str) -> Option<String>;
}

/// Owns the session and gates the admin view behind a one-time code.
///
/// The code is a client-side literal and only keeps casual visitors out of
/// the management screens. It is not an authentication mechanism.
pub struct AccessController {
    session: Session,
    unlock_code: String,
    challenge: Arc<dyn Challenge>,
}

impl AccessController {
    pub fn new(config: &AccessConfig, challenge: Arc<dyn Challenge>) -> Self {
        Self {
            session: Session::default(),
            unlock_code: config.unlock_code.clone(),
            challenge,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn view(&self) -> View {
        self.session.view
    }

    fn apply(&mut self, action: AccessAction) {
        let before = self.session;
        self.session = before.reduce(action, &self.unlock_code);
        if before != self.session {
            tracing::debug!("Session {:?} -> {:?}", before, self.session);
        }
    }

    /// Switch to the admin view, challenging for the code unless it was
    /// already accepted this session.
    pub async fn request_admin(&mut self) -> Result<View> {
        self.apply(AccessAction::RequestAdmin);
        if self.session.access == AccessState::AdminUnlocked {
            return Ok(self.session.view);
        }

        let answer = self.challenge.challenge(CHALLENGE_PROMPT).await;
        self.apply(AccessAction::ChallengeAnswered(answer));

        if self.session.is_admin_view() {
            tracing::info!("Admin view unlocked");
            Ok(self.session.view)
        } else {
            tracing::warn!("Admin code challenge failed");
            Err(AppError::AccessDenied(INCORRECT_CODE_MESSAGE.to_string()))
        }
    }

    /// Switch to the user view. Always allowed; keeps the unlock.
    pub fn request_user(&mut self) -> View {
        self.apply(AccessAction::RequestUser);
        self.session.view
    }

    /// Fail unless the admin view is active
    pub fn require_admin(&self) -> Result<()> {
        if self.session.is_admin_view() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Switch to the admin view first".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned answers and counts how often it was asked
    struct ScriptedChallenge {
        answers: Mutex<VecDeque<Option<String>>>,
        asked: Mutex<usize>,
    }

    impl ScriptedChallenge {
        fn new(answers: Vec<Option<&str>>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers.into_iter().map(|a| a.map(String::from)).collect()),
                asked: Mutex::new(0),
            })
        }

        fn asked(&self) -> usize {
            *self.asked.lock().unwrap()
        }
    }

    #[async_trait]
    impl Challenge for ScriptedChallenge {
        async fn challenge(&self, prompt: &str) -> Option<String> {
            assert_eq!(prompt, CHALLENGE_PROMPT);
            *self.asked.lock().unwrap() += 1;
            self.answers.lock().unwrap().pop_front().flatten()
        }
    }

    fn controller(challenge: Arc<ScriptedChallenge>) -> AccessController {
        AccessController::new(&AccessConfig::default(), challenge)
    }

    #[tokio::test]
    async fn test_correct_code_unlocks_admin() {
        let challenge = ScriptedChallenge::new(vec![Some("123123")]);
        let mut access = controller(Arc::clone(&challenge));

        assert_eq!(access.request_admin().await.unwrap(), View::Admin);
        assert_eq!(access.session().access, AccessState::AdminUnlocked);
        assert!(access.require_admin().is_ok());
        assert_eq!(challenge.asked(), 1);
    }

    #[tokio::test]
    async fn test_wrong_code_is_denied() {
        let challenge = ScriptedChallenge::new(vec![Some("nope")]);
        let mut access = controller(challenge);

        match access.request_admin().await {
            Err(AppError::AccessDenied(msg)) => assert_eq!(msg, "Incorrect code."),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(access.session(), Session::default());
        assert!(matches!(access.require_admin(), Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_cancelled_prompt_is_denied() {
        let mut access = controller(ScriptedChallenge::new(vec![None]));
        assert!(matches!(
            access.request_admin().await,
            Err(AppError::AccessDenied(_))
        ));
        assert_eq!(access.view(), View::User);
    }

    #[tokio::test]
    async fn test_unlocked_never_reprompts() {
        let challenge = ScriptedChallenge::new(vec![Some("123123")]);
        let mut access = controller(Arc::clone(&challenge));

        access.request_admin().await.unwrap();
        assert_eq!(access.request_user(), View::User);
        assert!(access.require_admin().is_err());

        for _ in 0..3 {
            assert_eq!(access.request_admin().await.unwrap(), View::Admin);
        }
        assert_eq!(challenge.asked(), 1);
    }

    #[tokio::test]
    async fn test_retry_after_wrong_code() {
        let challenge = ScriptedChallenge::new(vec![Some("111111"), Some("123123")]);
        let mut access = controller(Arc::clone(&challenge));

        assert!(access.request_admin().await.is_err());
        assert!(access.request_admin().await.is_ok());
        assert_eq!(challenge.asked(), 2);
    }

    #[tokio::test]
    async fn test_configured_code() {
        let config = AccessConfig {
            unlock_code: "letmein".to_string(),
            ..AccessConfig::default()
        };
        let mut access =
            AccessController::new(&config, ScriptedChallenge::new(vec![Some("123123")]));
        assert!(access.request_admin().await.is_err());
    }
}
