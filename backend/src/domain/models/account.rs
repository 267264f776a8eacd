use std::fmt;
use std::str::FromStr;

/// Role stored in the `role` field of a `users` document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    /// Section names, referenced by name rather than id
    pub sections: Vec<String>,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: String,
    pub name: String,
    /// Section name, referenced by name rather than id
    pub section: String,
}

/// A person with a role. The role is fixed once the account exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Account {
    Teacher(Teacher),
    Student(Student),
}

impl Account {
    pub fn id(&self) -> &str {
        match self {
            Account::Teacher(t) => &t.id,
            Account::Student(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Account::Teacher(t) => &t.name,
            Account::Student(s) => &s.name,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Account::Teacher(_) => Role::Teacher,
            Account::Student(_) => Role::Student,
        }
    }

    pub fn into_teacher(self) -> Option<Teacher> {
        match self {
            Account::Teacher(t) => Some(t),
            Account::Student(_) => None,
        }
    }

    pub fn into_student(self) -> Option<Student> {
        match self {
            Account::Student(s) => Some(s),
            Account::Teacher(_) => None,
        }
    }
}
