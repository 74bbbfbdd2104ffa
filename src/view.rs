//! Pure rendering of application state.
//!
//! Nothing here touches the network or the DOM: a [`Directory`] goes in, view
//! models and HTML fragments come out. Delete buttons carry `data-activity`
//! and `data-participant` so one listener on the list container can route
//! every click through [`delete_target`].

use std::fmt::Write as _;

use askama::Template;

use crate::error::Result;
use crate::model::Directory;

pub const LOADING_TEXT: &str = "Loading activities...";
pub const LOAD_FAILED_TEXT: &str = "Failed to load activities. Please try again later.";
pub const NO_PARTICIPANTS_TEXT: &str = "No participants yet";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

/// A removable roster line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantEntry>,
}

/// Content of the activity list container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListView {
    #[default]
    Loading,
    Loaded(Vec<ActivityCard>),
    Failed,
}

#[derive(Template)]
#[template(path = "activities.html")]
struct ActivitiesTemplate<'a> {
    cards: &'a [ActivityCard],
    no_participants: &'a str,
}

#[derive(Template)]
#[template(path = "status.html")]
struct StatusTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "options.html")]
struct OptionsTemplate<'a> {
    placeholder: &'a str,
    options: &'a [String],
}

impl ListView {
    pub fn render(directory: &Directory) -> Self {
        let cards = directory
            .iter()
            .map(|(name, activity)| ActivityCard {
                name: name.to_string(),
                description: activity.description.clone(),
                schedule: activity.schedule.clone(),
                spots_left: activity.spots_left(),
                participants: activity
                    .participants
                    .iter()
                    .map(|email| ParticipantEntry {
                        activity: name.to_string(),
                        email: email.clone(),
                    })
                    .collect(),
            })
            .collect();

        ListView::Loaded(cards)
    }

    pub fn cards(&self) -> &[ActivityCard] {
        match self {
            ListView::Loaded(cards) => cards,
            ListView::Loading | ListView::Failed => &[],
        }
    }

    pub fn card(&self, name: &str) -> Option<&ActivityCard> {
        self.cards().iter().find(|card| card.name == name)
    }

    pub fn removable_entries(&self) -> impl Iterator<Item = &ParticipantEntry> {
        self.cards().iter().flat_map(|card| card.participants.iter())
    }

    pub fn to_html(&self) -> Result<String> {
        let html = match self {
            ListView::Loading => StatusTemplate {
                message: LOADING_TEXT,
            }
            .render()?,
            ListView::Failed => StatusTemplate {
                message: LOAD_FAILED_TEXT,
            }
            .render()?,
            ListView::Loaded(cards) => ActivitiesTemplate {
                cards: cards.as_slice(),
                no_participants: NO_PARTICIPANTS_TEXT,
            }
            .render()?,
        };
        Ok(html)
    }

    /// Plain text rendering for terminals.
    pub fn to_text(&self) -> String {
        let cards = match self {
            ListView::Loading => return format!("{LOADING_TEXT}\n"),
            ListView::Failed => return format!("{LOAD_FAILED_TEXT}\n"),
            ListView::Loaded(cards) => cards,
        };

        let mut out = String::new();
        for card in cards {
            // writing to a String cannot fail
            let _ = writeln!(out, "{}", card.name);
            let _ = writeln!(out, "  {}", card.description);
            let _ = writeln!(out, "  Schedule: {}", card.schedule);
            let _ = writeln!(out, "  Availability: {} spots left", card.spots_left);
            let _ = writeln!(out, "  Participants:");
            if card.participants.is_empty() {
                let _ = writeln!(out, "    {NO_PARTICIPANTS_TEXT}");
            }
            for entry in &card.participants {
                let _ = writeln!(out, "    - {}", entry.email);
            }
        }
        out
    }
}

/// The signup form's activity selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    options: Vec<String>,
}

impl Selector {
    /// Replaces every option with the directory's activity names.
    pub fn rebuild(&mut self, directory: &Directory) {
        self.options.clear();
        self.options.extend(directory.names().map(str::to_string));
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.iter().any(|option| option == name)
    }

    pub fn to_html(&self) -> Result<String> {
        Ok(OptionsTemplate {
            placeholder: SELECT_PLACEHOLDER,
            options: &self.options,
        }
        .render()?)
    }
}

/// Resolves a delegated click from a delete button's data attributes.
pub fn delete_target(activity: Option<String>, participant: Option<String>) -> Option<ParticipantEntry> {
    match (activity, participant) {
        (Some(activity), Some(email)) if !activity.is_empty() && !email.is_empty() => {
            Some(ParticipantEntry { activity, email })
        }
        _ => None,
    }
}

/// Question asked before a participant is removed.
pub fn confirmation_prompt(activity: &str, email: &str) -> String {
    format!("Are you sure you want to unregister {email} from {activity}?")
}
