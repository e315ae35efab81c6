use directory_core::{Agent, AgentStatus, FetchState};
use serde::Serialize;

use crate::LOADING_LABEL;

/// Fixed visual treatment per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Danger,
}

impl Tone {
    pub fn for_status(status: AgentStatus) -> Self {
        match status {
            AgentStatus::Idle => Tone::Neutral,
            AgentStatus::Running => Tone::Info,
            AgentStatus::Completed => Tone::Success,
            AgentStatus::Error => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: Tone,
}

impl From<AgentStatus> for StatusBadge {
    fn from(status: AgentStatus) -> Self {
        Self {
            label: status.as_str(),
            tone: Tone::for_status(status),
        }
    }
}

/// One card per agent, keyed by the agent's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentCard {
    pub key: String,
    pub title: String,
    pub badge: StatusBadge,
    pub description: String,
    /// Present only for agents that have been active.
    pub last_active: Option<String>,
}

impl AgentCard {
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            key: agent.name().to_string(),
            title: agent.name().to_string(),
            badge: StatusBadge::from(agent.status()),
            description: agent.description().to_string(),
            last_active: agent.last_active().map(|at| format!("Last active: {at}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DirectoryView {
    /// Nothing requested yet.
    Blank,
    Progress { label: &'static str },
    /// No retry affordance is attached.
    Alert { message: String },
    Cards { cards: Vec<AgentCard> },
}

impl DirectoryView {
    pub fn cards(&self) -> &[AgentCard] {
        match self {
            DirectoryView::Cards { cards } => cards,
            _ => &[],
        }
    }
}

pub fn render(state: &FetchState) -> DirectoryView {
    match state {
        FetchState::Idle => DirectoryView::Blank,
        FetchState::Loading => DirectoryView::Progress {
            label: LOADING_LABEL,
        },
        FetchState::Failure(message) => DirectoryView::Alert {
            message: message.clone(),
        },
        FetchState::Success(agents) => DirectoryView::Cards {
            cards: agents.iter().map(AgentCard::from_agent).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_core::LOAD_FAILURE_MESSAGE;

    #[test]
    fn loading_shows_progress_only() {
        assert_eq!(
            render(&FetchState::Loading),
            DirectoryView::Progress {
                label: LOADING_LABEL
            }
        );
        assert!(render(&FetchState::Loading).cards().is_empty());
    }

    #[test]
    fn failure_becomes_alert() {
        let view = render(&FetchState::failure(LOAD_FAILURE_MESSAGE));
        assert_eq!(
            view,
            DirectoryView::Alert {
                message: LOAD_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn success_renders_one_card_per_agent_in_order() {
        let state = FetchState::success(vec![
            Agent::new(
                "researcher-1",
                AgentStatus::Running,
                "Research",
                Some("2024-01-01T00:00:00Z".to_string()),
            ),
            Agent::new("memory", AgentStatus::Idle, "", None),
        ]);

        let view = render(&state);
        let cards = view.cards();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].key, "researcher-1");
        assert_eq!(cards[0].badge.tone, Tone::Info);
        assert_eq!(
            cards[0].last_active.as_deref(),
            Some("Last active: 2024-01-01T00:00:00Z")
        );
        assert_eq!(cards[1].key, "memory");
        assert_eq!(cards[1].last_active, None);
    }

    #[test]
    fn every_status_has_a_distinct_tone() {
        let tones: Vec<_> = AgentStatus::ALL.iter().map(|s| Tone::for_status(*s)).collect();
        assert_eq!(
            tones,
            [Tone::Neutral, Tone::Info, Tone::Success, Tone::Danger]
        );
    }

    #[test]
    fn view_serializes_with_kind_tag() {
        let value = serde_json::to_value(render(&FetchState::Idle)).unwrap();
        assert_eq!(value["kind"], "blank");
    }
}
