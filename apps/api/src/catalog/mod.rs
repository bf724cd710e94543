//! Static track, skill, and course catalogs.
//!
//! Pure data, version-controlled: the assessment and recommendation flows
//! look everything up here by track identifier.

use serde::{Deserialize, Serialize};

/// Career-domain enumeration selecting which skill and course catalogs apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    Fsd,
    Sde,
    DataScience,
    UiUx,
}

/// Deterministic fallback when the recommendation flow is entered with no
/// persisted track selection.
pub const DEFAULT_TRACK: Track = Track::Fsd;

impl Track {
    pub const ALL: [Track; 4] = [Track::Fsd, Track::Sde, Track::DataScience, Track::UiUx];

    pub fn as_str(self) -> &'static str {
        match self {
            Track::Fsd => "fsd",
            Track::Sde => "sde",
            Track::DataScience => "data-science",
            Track::UiUx => "ui-ux",
        }
    }

    pub fn parse(s: &str) -> Option<Track> {
        match s {
            "fsd" => Some(Track::Fsd),
            "sde" => Some(Track::Sde),
            "data-science" => Some(Track::DataScience),
            "ui-ux" => Some(Track::UiUx),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Track::Fsd => "Full Stack Development",
            Track::Sde => "Software Development Engineer",
            Track::DataScience => "Data Science",
            Track::UiUx => "UI/UX Design",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Track::Fsd => {
                "Master both frontend and backend technologies to build complete web applications. \
                 Learn React, Node.js, databases, and deployment."
            }
            Track::Sde => {
                "Focus on algorithmic thinking, data structures, and system design. \
                 Perfect for roles at tech companies."
            }
            Track::DataScience => {
                "Analyze data, build machine learning models, and derive insights. \
                 Combine statistics, programming, and domain expertise."
            }
            Track::UiUx => {
                "Create beautiful, user-friendly interfaces and experiences. \
                 Master design principles, prototyping, and user research."
            }
        }
    }

    /// Headline skills shown on the track-selection step (not the assessment
    /// catalog — see [`assessment_skills`]).
    pub fn headline_skills(self) -> &'static [&'static str] {
        match self {
            Track::Fsd => &[
                "HTML/CSS", "JavaScript", "React", "Node.js", "Express", "MongoDB", "Git", "AWS",
            ],
            Track::Sde => &[
                "Data Structures",
                "Algorithms",
                "System Design",
                "Java/Python",
                "SQL",
                "Testing",
                "Git",
                "Debugging",
            ],
            Track::DataScience => &[
                "Python",
                "SQL",
                "Statistics",
                "Machine Learning",
                "Pandas",
                "NumPy",
                "Visualization",
                "R",
            ],
            Track::UiUx => &[
                "Figma",
                "User Research",
                "Prototyping",
                "Design Systems",
                "Typography",
                "Color Theory",
                "Usability",
                "HTML/CSS",
            ],
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full self-assessment skill catalog for a track. Exactly 12 skills per
/// track; the assessment flow partitions this list into known/unknown.
pub fn assessment_skills(track: Track) -> &'static [&'static str] {
    match track {
        Track::Fsd => &[
            "HTML & CSS Fundamentals",
            "JavaScript (ES6+)",
            "React.js",
            "State Management (Redux/Context)",
            "Node.js & Express",
            "RESTful APIs",
            "Database Design (SQL/NoSQL)",
            "Git Version Control",
            "Responsive Design",
            "Authentication & Security",
            "Testing (Unit/Integration)",
            "Deployment & DevOps",
        ],
        Track::Sde => &[
            "Data Structures",
            "Algorithms & Complexity",
            "Object-Oriented Programming",
            "System Design Basics",
            "Database Management",
            "Software Testing",
            "Design Patterns",
            "Code Review & Quality",
            "Debugging & Profiling",
            "Version Control (Git)",
            "Agile Methodologies",
            "Problem Solving",
        ],
        Track::DataScience => &[
            "Python Programming",
            "SQL & Database Querying",
            "Statistics & Probability",
            "Data Visualization",
            "Pandas & NumPy",
            "Machine Learning Algorithms",
            "Data Cleaning & Preprocessing",
            "Exploratory Data Analysis",
            "Model Evaluation",
            "Feature Engineering",
            "Big Data Tools",
            "Business Intelligence",
        ],
        Track::UiUx => &[
            "Design Principles",
            "User Research Methods",
            "Wireframing & Prototyping",
            "Figma/Sketch Proficiency",
            "Typography & Color Theory",
            "User Journey Mapping",
            "Usability Testing",
            "Design Systems",
            "Responsive Design",
            "Accessibility (WCAG)",
            "Information Architecture",
            "Visual Design",
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A course in the static recommendation catalog. The mutable `completed`
/// flag lives on the per-session board, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub difficulty: Difficulty,
    pub video_url: &'static str,
}

pub fn courses(track: Track) -> &'static [CourseDef] {
    match track {
        Track::Sde => &[
            CourseDef {
                id: "1",
                title: "Data Structures & Algorithms",
                description: "Master core DS & Algorithms used in interviews.",
                duration: "8h 20m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=RBSGKlAvoiM",
            },
            CourseDef {
                id: "2",
                title: "System Design Basics",
                description: "Understand scalability, load balancing and design patterns.",
                duration: "5h 10m",
                difficulty: Difficulty::Advanced,
                video_url: "https://www.youtube.com/watch?v=lxzGfKX0Q2Q",
            },
            CourseDef {
                id: "3",
                title: "Database Management",
                description: "Learn SQL, indexing, and transactions for efficient backends.",
                duration: "4h 40m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=HXV3zeQKqGY",
            },
            CourseDef {
                id: "4",
                title: "Object-Oriented Programming",
                description: "Master OOP principles and their real-world applications.",
                duration: "3h 30m",
                difficulty: Difficulty::Beginner,
                video_url: "https://www.youtube.com/watch?v=SiBw7os-_zI",
            },
        ],
        Track::Fsd => &[
            CourseDef {
                id: "1",
                title: "HTML & CSS Fundamentals",
                description: "Build responsive and modern UI layouts.",
                duration: "4h 30m",
                difficulty: Difficulty::Beginner,
                video_url: "https://www.youtube.com/watch?v=G3e-cpL7ofc",
            },
            CourseDef {
                id: "2",
                title: "JavaScript & ES6+",
                description: "Master modern JS syntax and DOM manipulation.",
                duration: "6h 00m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=PkZNo7MFNFg",
            },
            CourseDef {
                id: "3",
                title: "React & State Management",
                description: "Build interactive SPAs with React and Context API.",
                duration: "5h 45m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=bMknfKXIFA8",
            },
            CourseDef {
                id: "4",
                title: "Backend with Node.js",
                description: "Develop scalable APIs using Express and MongoDB.",
                duration: "5h 20m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=Oe421EPjeBE",
            },
        ],
        Track::UiUx => &[
            CourseDef {
                id: "1",
                title: "Design Thinking",
                description: "Learn empathy-driven design process.",
                duration: "3h 45m",
                difficulty: Difficulty::Beginner,
                video_url: "https://www.youtube.com/watch?v=_r0VX-aU_T8",
            },
            CourseDef {
                id: "2",
                title: "Figma for Beginners",
                description: "Master UI design basics with Figma.",
                duration: "4h 00m",
                difficulty: Difficulty::Beginner,
                video_url: "https://www.youtube.com/watch?v=jwCmIBJ8Jtc",
            },
            CourseDef {
                id: "3",
                title: "UX Principles",
                description: "Understand usability, accessibility, and design patterns.",
                duration: "5h 20m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=Ovj4hFxko7c",
            },
            CourseDef {
                id: "4",
                title: "Portfolio Design",
                description: "Create a professional design portfolio.",
                duration: "3h 30m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=ZtY4JfL4dQ8",
            },
        ],
        Track::DataScience => &[
            CourseDef {
                id: "1",
                title: "Python for Data Science",
                description: "Learn Python libraries used in data science.",
                duration: "6h 10m",
                difficulty: Difficulty::Beginner,
                video_url: "https://www.youtube.com/watch?v=_uQrJ0TkZlc",
            },
            CourseDef {
                id: "2",
                title: "Statistics & Probability",
                description: "Understand statistical concepts for data analysis.",
                duration: "4h 55m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=xxpc-HPKN28",
            },
            CourseDef {
                id: "3",
                title: "Machine Learning Basics",
                description: "Introduction to supervised and unsupervised ML models.",
                duration: "7h 20m",
                difficulty: Difficulty::Intermediate,
                video_url: "https://www.youtube.com/watch?v=GwIo3gDZCVQ",
            },
            CourseDef {
                id: "4",
                title: "Data Visualization",
                description: "Learn to create insightful visualizations using Python.",
                duration: "4h 05m",
                difficulty: Difficulty::Beginner,
                video_url: "https://www.youtube.com/watch?v=3Xc3CA655Y4",
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_track_has_twelve_assessment_skills() {
        for track in Track::ALL {
            assert_eq!(
                assessment_skills(track).len(),
                12,
                "track {track} has wrong skill count"
            );
        }
    }

    #[test]
    fn test_every_track_has_four_courses_with_unique_ids() {
        for track in Track::ALL {
            let list = courses(track);
            assert_eq!(list.len(), 4, "track {track} has wrong course count");
            let ids: HashSet<_> = list.iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), list.len(), "duplicate course id in {track}");
        }
    }

    #[test]
    fn test_parse_round_trips_as_str() {
        for track in Track::ALL {
            assert_eq!(Track::parse(track.as_str()), Some(track));
        }
        assert_eq!(Track::parse("cybersecurity"), None);
        assert_eq!(Track::parse(""), None);
    }

    #[test]
    fn test_serde_uses_kebab_case_ids() {
        let json = serde_json::to_string(&Track::DataScience).unwrap();
        assert_eq!(json, "\"data-science\"");
        let back: Track = serde_json::from_str("\"ui-ux\"").unwrap();
        assert_eq!(back, Track::UiUx);
    }

    #[test]
    fn test_default_track_is_fsd() {
        assert_eq!(DEFAULT_TRACK, Track::Fsd);
    }

    #[test]
    fn test_assessment_skills_have_no_duplicates() {
        for track in Track::ALL {
            let skills = assessment_skills(track);
            let unique: HashSet<_> = skills.iter().collect();
            assert_eq!(unique.len(), skills.len());
        }
    }
}
