//! Read-only course catalog.
//!
//! Static data: every course the platform can unlock, keyed by id, with the
//! canonical careers it is relevant to. The three `c_id_*` foundation courses
//! are the milestone rewards and must always exist here.

use serde::{Deserialize, Serialize};

use crate::career;

/// Whether a course can currently be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Available,
    Unavailable,
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: &'static str,
    pub title: &'static str,
    pub difficulty: &'static str,
    pub related_careers: &'static [&'static str],
    pub status: CourseStatus,
}

use crate::career::{BUSINESS_SYSTEMS, COMPUTER_SCIENCE, DATA_AI, DIGITAL_MARKETING, UX_DESIGN};
use self::CourseStatus::Available;

/// The full catalog.
pub fn all_courses() -> &'static [Course] {
    const CATALOG: &[Course] = &[
        // Business Information Systems track.
        Course {
            id: "c1",
            title: "Digital Supply Chain Management",
            difficulty: "Advanced",
            related_careers: &[BUSINESS_SYSTEMS],
            status: Available,
        },
        Course {
            id: "c4",
            title: "ERP Implementation with SAP S/4HANA",
            difficulty: "Advanced",
            related_careers: &[BUSINESS_SYSTEMS, COMPUTER_SCIENCE],
            status: Available,
        },
        Course {
            id: "c5",
            title: "Business Process Modeling with BPMN",
            difficulty: "Intermediate",
            related_careers: &[BUSINESS_SYSTEMS, DATA_AI],
            status: Available,
        },
        Course {
            id: "c8",
            title: "Business Intelligence with Power BI and SQL",
            difficulty: "Intermediate",
            related_careers: &[BUSINESS_SYSTEMS, DATA_AI],
            status: Available,
        },
        // Computer Science track.
        Course {
            id: "c9",
            title: "Advanced Algorithms and Data Structures",
            difficulty: "Hard",
            related_careers: &[COMPUTER_SCIENCE, BUSINESS_SYSTEMS, DATA_AI],
            status: Available,
        },
        Course {
            id: "c11",
            title: "Microservice Architecture with Docker and Kubernetes",
            difficulty: "Advanced",
            related_careers: &[COMPUTER_SCIENCE, BUSINESS_SYSTEMS],
            status: Available,
        },
        Course {
            id: "c12",
            title: "Introduction to Cybersecurity and Ethical Hacking",
            difficulty: "Beginner",
            related_careers: &[COMPUTER_SCIENCE, BUSINESS_SYSTEMS],
            status: Available,
        },
        Course {
            id: "c14",
            title: "Operating Systems, Threads and Concurrency",
            difficulty: "Intermediate",
            related_careers: &[COMPUTER_SCIENCE],
            status: Available,
        },
        // UX/UI Design track.
        Course {
            id: "c15",
            title: "Design Thinking and Agile Methods for Designers",
            difficulty: "Intermediate",
            related_careers: &[UX_DESIGN, DIGITAL_MARKETING],
            status: Available,
        },
        Course {
            id: "c16",
            title: "High-Fidelity Prototyping and Animation in Figma",
            difficulty: "Advanced",
            related_careers: &[UX_DESIGN],
            status: Available,
        },
        Course {
            id: "c19",
            title: "Web Accessibility (WCAG) and Inclusive Design",
            difficulty: "Advanced",
            related_careers: &[UX_DESIGN, COMPUTER_SCIENCE],
            status: Available,
        },
        // Digital Marketing track.
        Course {
            id: "c21",
            title: "Advanced SEO and High-Impact Content Strategy",
            difficulty: "Advanced",
            related_careers: &[DIGITAL_MARKETING],
            status: Available,
        },
        Course {
            id: "c23",
            title: "E-commerce Strategy and Online Sales Platforms",
            difficulty: "Beginner",
            related_careers: &[DIGITAL_MARKETING, BUSINESS_SYSTEMS],
            status: Available,
        },
        Course {
            id: "c25",
            title: "Web Analytics and Funnels with Google Analytics 4",
            difficulty: "Advanced",
            related_careers: &[DIGITAL_MARKETING, DATA_AI],
            status: Available,
        },
        // Data Science & AI track.
        Course {
            id: "c27",
            title: "Machine Learning with Python, Scikit-learn and MLOps",
            difficulty: "Advanced",
            related_careers: &[DATA_AI, COMPUTER_SCIENCE],
            status: Available,
        },
        Course {
            id: "c29",
            title: "Big Data Fundamentals with Hadoop and Spark",
            difficulty: "Hard",
            related_careers: &[DATA_AI, BUSINESS_SYSTEMS],
            status: Available,
        },
        Course {
            id: "c32",
            title: "Advanced Data Visualization with Tableau",
            difficulty: "Intermediate",
            related_careers: &[DATA_AI, UX_DESIGN],
            status: Available,
        },
        // Foundation courses granted by score milestones. Listed last so the
        // wheel and the suggestion list lead with track-specific courses.
        Course {
            id: "c_id_001",
            title: "Learning Foundations and Study Skills",
            difficulty: "Beginner",
            related_careers: &[BUSINESS_SYSTEMS, COMPUTER_SCIENCE, UX_DESIGN, DIGITAL_MARKETING, DATA_AI],
            status: Available,
        },
        Course {
            id: "c_id_002",
            title: "Core Concepts Mastery Workshop",
            difficulty: "Intermediate",
            related_careers: &[BUSINESS_SYSTEMS, COMPUTER_SCIENCE, UX_DESIGN, DIGITAL_MARKETING, DATA_AI],
            status: Available,
        },
        Course {
            id: "c_id_003",
            title: "Professional Practice Capstone",
            difficulty: "Advanced",
            related_careers: &[BUSINESS_SYSTEMS, COMPUTER_SCIENCE, UX_DESIGN, DIGITAL_MARKETING, DATA_AI],
            status: Available,
        },
    ];
    CATALOG
}

/// Look up a course by id.
pub fn find(id: &str) -> Option<&'static Course> {
    all_courses().iter().find(|c| c.id == id)
}

/// Courses open for purchase.
pub fn available_courses() -> Vec<&'static Course> {
    all_courses()
        .iter()
        .filter(|c| c.status == CourseStatus::Available)
        .collect()
}

/// Courses whose related careers contain the canonical key for `career`.
pub fn courses_for_career(career_name: &str) -> Vec<&'static Course> {
    let canonical = career::normalize(career_name);
    all_courses()
        .iter()
        .filter(|c| c.related_careers.contains(&canonical.as_str()))
        .collect()
}

/// Post-game suggestions: related courses first, whole catalog when the
/// related pool is too thin. Order is catalog order, no reshuffling.
pub fn suggest_courses(career_name: &str, count: usize) -> Vec<&'static Course> {
    let related = courses_for_career(career_name);
    let pool = if related.len() >= count {
        related
    } else {
        all_courses().iter().collect()
    };
    pool.into_iter().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_courses_exist() {
        for id in ["c_id_001", "c_id_002", "c_id_003"] {
            let course = find(id).unwrap();
            assert_eq!(course.status, CourseStatus::Available);
        }
    }

    #[test]
    fn test_courses_for_career_uses_canonical_key() {
        // A known variant must land on the same courses as the canonical name.
        let canonical = courses_for_career(career::BUSINESS_SYSTEMS);
        let variant = courses_for_career("Systems Engineering");
        assert!(!canonical.is_empty());
        assert_eq!(
            canonical.iter().map(|c| c.id).collect::<Vec<_>>(),
            variant.iter().map(|c| c.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_suggest_falls_back_to_full_catalog() {
        let suggestions = suggest_courses("Veterinary Medicine", 3);
        assert_eq!(suggestions.len(), 3);
    }

    #[test]
    fn test_suggest_is_deterministic() {
        let a = suggest_courses(career::UX_DESIGN, 3);
        let b = suggest_courses(career::UX_DESIGN, 3);
        assert_eq!(
            a.iter().map(|c| c.id).collect::<Vec<_>>(),
            b.iter().map(|c| c.id).collect::<Vec<_>>()
        );
    }
}
