//! Static question bank.
//!
//! Five questions per (career, difficulty) pair, four options each, exactly
//! one correct. Careers without their own bank get the default career's set;
//! a bank miss is a fallback, never an error.

use crate::career::{self, BUSINESS_SYSTEMS, UX_DESIGN};
use crate::quiz::Difficulty;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: &'static str,
}

const fn q(
    id: &'static str,
    text: &'static str,
    options: [&'static str; 4],
    correct_answer: &'static str,
) -> Question {
    Question { id, text, options, correct_answer }
}

const BUSINESS_EASY: [Question; 5] = [
    q(
        "bis-e-1",
        "What is a business process?",
        [
            "A sequence of activities that creates value",
            "A software diagram",
            "A database",
            "A digital product",
        ],
        "A sequence of activities that creates value",
    ),
    q(
        "bis-e-2",
        "What is a KPI?",
        [
            "A marketing tool",
            "A web server",
            "A key performance indicator",
            "An accounting record",
        ],
        "A key performance indicator",
    ),
    q(
        "bis-e-3",
        "What is the purpose of strategic planning?",
        [
            "Laying off staff",
            "Setting the organization's direction",
            "Increasing workload",
            "Closing departments",
        ],
        "Setting the organization's direction",
    ),
    q(
        "bis-e-4",
        "What is an organization chart?",
        [
            "A process diagram",
            "A representation of the organizational structure",
            "A financial plan",
            "An activity calendar",
        ],
        "A representation of the organizational structure",
    ),
    q(
        "bis-e-5",
        "What is a job competency?",
        [
            "A job posting",
            "A skill or knowledge a role requires",
            "An employment contract",
            "A company form",
        ],
        "A skill or knowledge a role requires",
    ),
];

const BUSINESS_MEDIUM: [Question; 5] = [
    q(
        "bis-m-1",
        "Which tool analyzes organizational strengths and weaknesses?",
        ["Gantt chart", "SWOT analysis", "Standard operating procedure", "ER diagram"],
        "SWOT analysis",
    ),
    q(
        "bis-m-2",
        "What is business process re-engineering?",
        [
            "Repeating a process unchanged",
            "Radically redesigning processes to improve performance",
            "Removing functional areas",
            "Hiring new staff",
        ],
        "Radically redesigning processes to improve performance",
    ),
    q(
        "bis-m-3",
        "What does Total Quality Management pursue?",
        [
            "Reducing headcount",
            "Continuously improving products and services",
            "Upgrading company hardware",
            "Replacing managers",
        ],
        "Continuously improving products and services",
    ),
    q(
        "bis-m-4",
        "What is business logistics?",
        [
            "Digital marketing",
            "The art of persuading customers",
            "Managing the flow of goods and information",
            "Content creation",
        ],
        "Managing the flow of goods and information",
    ),
    q(
        "bis-m-5",
        "What is a process map?",
        [
            "An employee handbook",
            "A graphical representation of the value chain",
            "A service contract",
            "A company server",
        ],
        "A graphical representation of the value chain",
    ),
];

const BUSINESS_HARD: [Question; 5] = [
    q(
        "bis-h-1",
        "What is Lean Management?",
        [
            "A methodology for cutting waste and maximizing value",
            "A kind of CRM",
            "Accounting software",
            "A security certification",
        ],
        "A methodology for cutting waste and maximizing value",
    ),
    q(
        "bis-h-2",
        "What is the Balanced Scorecard for?",
        [
            "Grading metric systems",
            "Aligning strategic objectives with performance indicators",
            "Benchmarking computer hardware",
            "Controlling financial inventory",
        ],
        "Aligning strategic objectives with performance indicators",
    ),
    q(
        "bis-h-3",
        "What characterizes the Kaizen model?",
        [
            "Sudden radical change",
            "Continuous improvement through small constant changes",
            "Suspending processes",
            "Immediate full automation",
        ],
        "Continuous improvement through small constant changes",
    ),
    q(
        "bis-h-4",
        "What is Porter's value chain?",
        [
            "A software model",
            "A framework for analyzing activities that create competitive advantage",
            "An accounting system",
            "A staffing method",
        ],
        "A framework for analyzing activities that create competitive advantage",
    ),
    q(
        "bis-h-5",
        "What does an integrated management dashboard provide?",
        [
            "An agricultural production plan",
            "A comprehensive strategic control system",
            "A territorial development plan",
            "A legal risk map",
        ],
        "A comprehensive strategic control system",
    ),
];

const COMPUTING_EASY: [Question; 5] = [
    q(
        "cs-e-1",
        "What is an algorithm?",
        ["A virus", "A sequence of logical steps", "A hardware component", "A system error"],
        "A sequence of logical steps",
    ),
    q(
        "cs-e-2",
        "Which of these is a low-level language?",
        ["Python", "Java", "Assembly", "JavaScript"],
        "Assembly",
    ),
    q(
        "cs-e-3",
        "What does CPU stand for?",
        [
            "Central Processing Unit",
            "Computer Personal Unit",
            "Central Program Utility",
            "Control Panel Unit",
        ],
        "Central Processing Unit",
    ),
    q(
        "cs-e-4",
        "What is a bit?",
        ["A large byte", "The smallest unit of information", "A file", "A processor"],
        "The smallest unit of information",
    ),
    q(
        "cs-e-5",
        "Which number system is base 2?",
        ["Decimal", "Octal", "Binary", "Hexadecimal"],
        "Binary",
    ),
];

const COMPUTING_MEDIUM: [Question; 5] = [
    q(
        "cs-m-1",
        "Which data structure is LIFO?",
        ["Queue", "Stack", "Tree", "Graph"],
        "Stack",
    ),
    q(
        "cs-m-2",
        "What is Big-O complexity?",
        [
            "The size of a file",
            "A measure of an algorithm's efficiency",
            "A large error",
            "A design pattern",
        ],
        "A measure of an algorithm's efficiency",
    ),
    q(
        "cs-m-3",
        "What is recursion?",
        [
            "An infinite loop",
            "A function that calls itself",
            "A compile error",
            "A database",
        ],
        "A function that calls itself",
    ),
    q(
        "cs-m-4",
        "What is a pointer?",
        [
            "A cursor",
            "A variable that stores a memory address",
            "A button",
            "A kind of error",
        ],
        "A variable that stores a memory address",
    ),
    q(
        "cs-m-5",
        "What distinguishes TCP from UDP?",
        [
            "Cable color",
            "Reliable versus unreliable delivery",
            "Windows versus Linux",
            "Cloud versus local",
        ],
        "Reliable versus unreliable delivery",
    ),
];

const COMPUTING_HARD: [Question; 5] = [
    q(
        "cs-h-1",
        "Which of these problems is NP-complete?",
        [
            "Adding two numbers",
            "The traveling salesman problem",
            "Sorting an array",
            "Hash table lookup",
        ],
        "The traveling salesman problem",
    ),
    q(
        "cs-h-2",
        "What is a deadlock?",
        ["A game", "Mutual blocking between processes", "A deadly virus", "A powered-off system"],
        "Mutual blocking between processes",
    ),
    q(
        "cs-h-3",
        "What does a JIT compiler do?",
        [
            "Compiles everything before execution",
            "Compiles during execution",
            "Compiles nothing",
            "Removes errors",
        ],
        "Compiles during execution",
    ),
    q(
        "cs-h-4",
        "What is the CAP theorem about?",
        [
            "Consistency, availability, partition tolerance",
            "Quality, accessibility, price",
            "Control, access, privacy",
            "None of these",
        ],
        "Consistency, availability, partition tolerance",
    ),
    q(
        "cs-h-5",
        "What is a hash map?",
        [
            "A geographic map",
            "An efficient key-value structure",
            "A sorted array",
            "A binary tree",
        ],
        "An efficient key-value structure",
    ),
];

const DESIGN_EASY: [Question; 5] = [
    q(
        "ux-e-1",
        "What does UX stand for?",
        ["User Xenon", "User Experience", "Ultra Xylophone", "Unit X"],
        "User Experience",
    ),
    q(
        "ux-e-2",
        "What is a wireframe?",
        ["A wire frame", "A low-fidelity visual outline", "Final code", "A video"],
        "A low-fidelity visual outline",
    ),
    q(
        "ux-e-3",
        "Which is a primary color in RGB?",
        ["Yellow", "Green", "Cyan", "Magenta"],
        "Green",
    ),
    q(
        "ux-e-4",
        "Which of these is a popular design tool?",
        ["Excel", "Figma", "Notepad", "Calculator"],
        "Figma",
    ),
    q(
        "ux-e-5",
        "What does UI stand for?",
        ["User Interface", "User Interaction", "Unique Identity", "Ultra Internet"],
        "User Interface",
    ),
];

const DESIGN_MEDIUM: [Question; 5] = [
    q(
        "ux-m-1",
        "What is visual hierarchy?",
        [
            "Arranging elements by importance",
            "Using many colors",
            "Making everything big",
            "Using only text",
        ],
        "Arranging elements by importance",
    ),
    q(
        "ux-m-2",
        "What is a heat map?",
        [
            "PC temperature",
            "A representation of user interaction",
            "An Instagram filter",
            "A design error",
        ],
        "A representation of user interaction",
    ),
    q(
        "ux-m-3",
        "What does Jakob's Law state?",
        [
            "Users prefer sites that work like ones they already know",
            "Design must be pretty",
            "Less is more",
            "Red is a bad color",
        ],
        "Users prefer sites that work like ones they already know",
    ),
    q(
        "ux-m-4",
        "What is A/B testing?",
        [
            "Trying two versions to see which performs better",
            "Testing the alphabet",
            "A blood test",
            "None of these",
        ],
        "Trying two versions to see which performs better",
    ),
    q(
        "ux-m-5",
        "What is web accessibility?",
        [
            "Free internet",
            "Design usable by people with disabilities",
            "Fast WiFi",
            "Bright colors",
        ],
        "Design usable by people with disabilities",
    ),
];

const DESIGN_HARD: [Question; 5] = [
    q(
        "ux-h-1",
        "What is skeuomorphism?",
        ["Flat design", "Imitating real-world objects", "Futuristic design", "Abstract design"],
        "Imitating real-world objects",
    ),
    q(
        "ux-h-2",
        "What does Fitts's Law describe?",
        [
            "Time to reach a target depends on distance and size",
            "Everything enters through the eyes",
            "The user is always right",
            "Never use Comic Sans",
        ],
        "Time to reach a target depends on distance and size",
    ),
    q(
        "ux-h-3",
        "What is a design system?",
        [
            "A piece of software",
            "A collection of reusable components and rules",
            "An operating system",
            "A logo",
        ],
        "A collection of reusable components and rules",
    ),
    q(
        "ux-h-4",
        "What are Nielsen's heuristics?",
        ["Ten usability principles", "Color rules", "Font types", "Marketing laws"],
        "Ten usability principles",
    ),
    q(
        "ux-h-5",
        "What is the Von Restorff effect?",
        [
            "The element that stands out is remembered best",
            "Everything is forgotten",
            "Blue is calming",
            "People do not read",
        ],
        "The element that stands out is remembered best",
    ),
];

/// Questions for the canonical career behind `career_name`. Careers with no
/// bank entry use the default career's bank.
pub fn questions_for(career_name: &str, difficulty: Difficulty) -> &'static [Question] {
    let canonical = career::normalize(career_name);
    let banks: [&'static [Question]; 3] = match canonical.as_str() {
        BUSINESS_SYSTEMS => [&BUSINESS_EASY, &BUSINESS_MEDIUM, &BUSINESS_HARD],
        UX_DESIGN => [&DESIGN_EASY, &DESIGN_MEDIUM, &DESIGN_HARD],
        // Computer Science doubles as the default bank.
        _ => [&COMPUTING_EASY, &COMPUTING_MEDIUM, &COMPUTING_HARD],
    };
    match difficulty {
        Difficulty::Easy => banks[0],
        Difficulty::Medium => banks[1],
        Difficulty::Hard => banks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::COMPUTER_SCIENCE;

    fn every_bank() -> Vec<&'static [Question]> {
        let mut banks = Vec::new();
        for career in [BUSINESS_SYSTEMS, COMPUTER_SCIENCE, UX_DESIGN] {
            for difficulty in Difficulty::ALL {
                banks.push(questions_for(career, difficulty));
            }
        }
        banks
    }

    #[test]
    fn test_every_bank_has_five_well_formed_questions() {
        for bank in every_bank() {
            assert_eq!(bank.len(), 5);
            for question in bank {
                let matches = question
                    .options
                    .iter()
                    .filter(|o| **o == question.correct_answer)
                    .count();
                assert_eq!(matches, 1, "question {} must have one correct option", question.id);
            }
        }
    }

    #[test]
    fn test_question_ids_are_unique() {
        let mut ids = std::collections::HashSet::new();
        for bank in every_bank() {
            for question in bank {
                assert!(ids.insert(question.id), "duplicate id {}", question.id);
            }
        }
    }

    #[test]
    fn test_unknown_career_gets_default_bank() {
        let fallback = questions_for("Veterinary Medicine", Difficulty::Easy);
        let default = questions_for(COMPUTER_SCIENCE, Difficulty::Easy);
        assert_eq!(fallback, default);
    }
}
