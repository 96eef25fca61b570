use serde::{Deserialize, Serialize};

const SKILL_SLOTS: usize = 6;
const PROJECT_SLOTS: usize = 5;
const ACHIEVEMENT_SLOTS: usize = 6;
const INTEREST_SLOTS: usize = 6;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub intro: String,
    pub paragraph_1: String,
    pub paragraph_2: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
    pub website: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub icon: String,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub tech: Vec<String>,
    pub live_url: String,
    pub github_url: String,
    pub has_preview: bool,
}

impl Project {
    /// The URL to embed as a live preview, when the project has one.
    pub fn preview_url(&self) -> Option<&str> {
        (self.has_preview && !self.live_url.is_empty()).then_some(self.live_url.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub icon: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Interest {
    pub emoji: String,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub intro: String,
}

/// Everything the page renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub personal: Personal,
    pub about: About,
    pub social: Social,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub achievements: Vec<Achievement>,
    pub interests: Vec<Interest>,
    pub resume: Resume,
    pub contact: Contact,
}

impl PortfolioData {
    /// What the page shows when no value is configured.
    pub fn placeholder() -> Self {
        Self::from_lookup(|_| None)
    }

    /// Builds the document from `KEY -> value` lookups (the process
    /// environment on the server). A key that is set but empty stays empty;
    /// only unset keys take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let present = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let skills = (1..=SKILL_SLOTS)
            .map(|slot| Skill {
                icon: value(&format!("SKILL_{slot}_ICON"), ""),
                name: value(&format!("SKILL_{slot}_NAME"), ""),
                description: value(&format!("SKILL_{slot}_DESCRIPTION"), ""),
            })
            .filter(|skill| !skill.name.is_empty())
            .collect();

        let projects = (1..=PROJECT_SLOTS)
            .filter_map(|slot| {
                let name = present(&format!("PROJECT_{slot}_NAME"))?;
                Some(Project {
                    name,
                    kind: value(&format!("PROJECT_{slot}_TYPE"), "Project"),
                    description: value(&format!("PROJECT_{slot}_DESCRIPTION"), ""),
                    tech: split_tech(&value(&format!("PROJECT_{slot}_TECH"), "")),
                    live_url: value(&format!("PROJECT_{slot}_LIVE_URL"), ""),
                    github_url: value(&format!("PROJECT_{slot}_GITHUB_URL"), ""),
                    has_preview: value(&format!("PROJECT_{slot}_HAS_PREVIEW"), "false")
                        .eq_ignore_ascii_case("true"),
                })
            })
            .collect();

        let achievements = (1..=ACHIEVEMENT_SLOTS)
            .filter_map(|slot| {
                let title = present(&format!("ACHIEVEMENT_{slot}_TITLE"))?;
                Some(Achievement {
                    icon: value(&format!("ACHIEVEMENT_{slot}_ICON"), "🏆"),
                    title,
                    date: value(&format!("ACHIEVEMENT_{slot}_DATE"), ""),
                    description: value(&format!("ACHIEVEMENT_{slot}_DESCRIPTION"), ""),
                    image_url: value(&format!("ACHIEVEMENT_{slot}_IMAGE_URL"), ""),
                })
            })
            .collect();

        let interests = (1..=INTEREST_SLOTS)
            .filter_map(|slot| {
                let text = present(&format!("INTEREST_{slot}_TEXT"))?;
                Some(Interest {
                    emoji: value(&format!("INTEREST_{slot}_EMOJI"), ""),
                    text,
                })
            })
            .collect();

        Self {
            personal: Personal {
                name: value("PORTFOLIO_NAME", "Your Name"),
                title: value("PORTFOLIO_TITLE", "Your Title"),
                email: value("PORTFOLIO_EMAIL", "your.email@example.com"),
                phone: value("PORTFOLIO_PHONE", ""),
            },
            about: About {
                intro: value("ABOUT_INTRO", ""),
                paragraph_1: value("ABOUT_PARAGRAPH_1", ""),
                paragraph_2: value("ABOUT_PARAGRAPH_2", ""),
            },
            social: Social {
                linkedin: value("SOCIAL_LINKEDIN", "#"),
                github: value("SOCIAL_GITHUB", "#"),
                twitter: value("SOCIAL_TWITTER", "#"),
                website: value("SOCIAL_WEBSITE", "#"),
            },
            skills,
            projects,
            achievements,
            interests,
            resume: Resume {
                description: value("RESUME_DESCRIPTION", "Download my resume"),
            },
            contact: Contact {
                intro: value("CONTACT_INTRO", ""),
            },
        }
    }
}

fn split_tech(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tech| !tech.is_empty())
        .map(ToString::to_string)
        .collect()
}
