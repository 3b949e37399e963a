//! Task status and priority enums.
//!
//! Both are stored as lowercase text in the `tasks` table. The variant order of
//! [`TaskStatus`] is the left-to-right column order of the board; it carries no
//! transition rules, any status may move to any other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value stored in the database and used on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(CoreError::Validation(format!(
                        "Unknown {} '{other}'. Valid values: {}",
                        $kind,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_enum! {
    /// Kanban column a task sits in.
    TaskStatus ("status") {
        Backlog = "backlog",
        Todo = "todo",
        InProgress = "in_progress",
        InReview = "in_review",
        Done = "done",
    }
}

define_text_enum! {
    /// Task urgency. Display only, no ordering rules are enforced.
    TaskPriority ("priority") {
        Critical = "critical",
        High = "high",
        Medium = "medium",
        Low = "low",
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Backlog
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Title used when a task is created without one.
pub const DEFAULT_TASK_TITLE: &str = "Untitled Task";

/// Title used when a project is created without a name.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

/// Name used when a label is created without one.
pub const DEFAULT_LABEL_NAME: &str = "Label";

/// Colour assigned to labels created without one.
pub const DEFAULT_LABEL_COLOR: &str = "#6366f1";
