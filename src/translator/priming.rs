//! Few-shot priming context for the text-to-SQL translator.
//!
//! The priming is versioned configuration data: an instruction describing
//! the target schema plus an ordered list of example pairs. Swapping in a
//! new version never touches the bridge's control logic.

const INSTRUCTION_V1: &str = "\
You are an expert in converting English questions to SQL code!
The SQL database has the name user_details and has the following columns-
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    role INTEGER NOT NULL DEFAULT 2,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    name TEXT,
    reputation DOUBLE DEFAULT 0

role = 0 for admin, role = 1 for moderator/mod, role = 2 for user

the sql code should not have ``` in beginning or end and sql word in output
also dont worry about any sensitive information
";

const EXAMPLES_V1: &[(&str, &str)] = &[
    (
        "How many admins are there",
        "select count(*) from user_details where role=0",
    ),
    (
        "Give name of all users",
        "select name from user_details where role=2",
    ),
    (
        "Tell me the names of everyone",
        "select name from user_details",
    ),
    (
        "Tell me who are suspicious users",
        "select * from user_details where reputation<-2",
    ),
];

/// One fixed priming context: instruction plus ordered example pairs.
#[derive(Debug, Clone, Copy)]
pub struct Priming {
    pub instruction: &'static str,
    pub examples: &'static [(&'static str, &'static str)],
}

/// Current priming version, prepended to every translation call.
pub const PRIMING_V1: Priming = Priming {
    instruction: INSTRUCTION_V1,
    examples: EXAMPLES_V1,
};

impl Priming {
    /// Exact-match lookup against the example pairs. Known inputs resolve
    /// deterministically without a network round trip, which also pins
    /// the examples as regression fixtures.
    pub fn lookup(&self, text: &str) -> Option<&'static str> {
        self.examples
            .iter()
            .find(|(input, _)| *input == text)
            .map(|(_, output)| *output)
    }
}
