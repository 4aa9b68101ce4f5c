//! Room state types and shared state handle.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Where the local participant is in the call lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallingState {
    Idle,
    Joining,
    Joined,
    Left,
}

impl CallingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Joining => "joining",
            Self::Joined => "joined",
            Self::Left => "left",
        }
    }

    /// The call surface renders only once joined; anything else shows a
    /// loading indicator.
    pub fn shows_call_surface(&self) -> bool {
        matches!(self, Self::Joined)
    }
}

/// Video layout for the call surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallLayout {
    Grid,
    #[default]
    SpeakerLeft,
    SpeakerRight,
}

/// Current room state, shared between the controller and whatever renders it.
#[derive(Debug, Clone)]
pub struct RoomState {
    pub calling_state: CallingState,
    pub layout: CallLayout,
    pub show_participants: bool,
    pub agent_request_pending: bool,
    pub is_host: bool,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            calling_state: CallingState::Idle,
            layout: CallLayout::default(),
            show_participants: false,
            agent_request_pending: false,
            is_host: false,
        }
    }
}

/// Thread-safe handle for sharing room state.
#[derive(Clone, Default)]
pub struct RoomStatusHandle {
    inner: Arc<Mutex<RoomState>>,
}

impl RoomStatusHandle {
    pub async fn get(&self) -> RoomState {
        self.inner.lock().await.clone()
    }

    pub async fn set_calling_state(&self, calling_state: CallingState) {
        self.inner.lock().await.calling_state = calling_state;
    }

    pub async fn set_layout(&self, layout: CallLayout) {
        self.inner.lock().await.layout = layout;
    }

    pub async fn toggle_participants(&self) -> bool {
        let mut state = self.inner.lock().await;
        state.show_participants = !state.show_participants;
        state.show_participants
    }

    pub async fn set_host(&self, is_host: bool) {
        self.inner.lock().await.is_host = is_host;
    }

    /// Claim the single outstanding agent request slot. Returns false if a
    /// request is already pending, in which case the caller must not issue
    /// another one.
    pub async fn begin_agent_request(&self) -> bool {
        let mut state = self.inner.lock().await;
        if state.agent_request_pending {
            return false;
        }
        state.agent_request_pending = true;
        true
    }

    /// Release the slot once the request settles, success or failure.
    pub async fn finish_agent_request(&self) {
        self.inner.lock().await.agent_request_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calling_state_as_str() {
        assert_eq!(CallingState::Idle.as_str(), "idle");
        assert_eq!(CallingState::Joining.as_str(), "joining");
        assert_eq!(CallingState::Joined.as_str(), "joined");
        assert_eq!(CallingState::Left.as_str(), "left");
    }

    #[test]
    fn test_only_joined_shows_call_surface() {
        assert!(CallingState::Joined.shows_call_surface());
        assert!(!CallingState::Idle.shows_call_surface());
        assert!(!CallingState::Joining.shows_call_surface());
        assert!(!CallingState::Left.shows_call_surface());
    }

    #[test]
    fn test_default_layout_is_speaker_left() {
        assert_eq!(CallLayout::default(), CallLayout::SpeakerLeft);
    }

    #[test]
    fn test_layout_serialization() {
        assert_eq!(
            serde_json::to_string(&CallLayout::SpeakerRight).unwrap(),
            "\"speaker-right\""
        );
        let parsed: CallLayout = serde_json::from_str("\"grid\"").unwrap();
        assert_eq!(parsed, CallLayout::Grid);
    }

    #[tokio::test]
    async fn test_agent_request_slot_blocks_second_request() {
        let handle = RoomStatusHandle::default();
        assert!(handle.begin_agent_request().await);
        // A second press while the first is in flight must be refused.
        assert!(!handle.begin_agent_request().await);

        handle.finish_agent_request().await;
        assert!(handle.begin_agent_request().await);
    }

    #[tokio::test]
    async fn test_finish_rearms_even_after_failure_path() {
        let handle = RoomStatusHandle::default();
        assert!(handle.begin_agent_request().await);
        handle.finish_agent_request().await;
        assert!(!handle.get().await.agent_request_pending);
    }

    #[tokio::test]
    async fn test_participants_toggle() {
        let handle = RoomStatusHandle::default();
        assert!(handle.toggle_participants().await);
        assert!(!handle.toggle_participants().await);
    }

    #[tokio::test]
    async fn test_room_state_default() {
        let handle = RoomStatusHandle::default();
        let state = handle.get().await;
        assert_eq!(state.calling_state, CallingState::Idle);
        assert_eq!(state.layout, CallLayout::SpeakerLeft);
        assert!(!state.show_participants);
        assert!(!state.agent_request_pending);
        assert!(!state.is_host);
    }
}
