use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Trainee identity. Age is derived from the birth date whenever it is read,
/// never stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub birth_date: Date,
    pub gender: Gender,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, birth_date: Date, gender: Gender) -> Self {
        Self {
            name: name.into(),
            birth_date,
            gender,
        }
    }

    pub fn age_on(&self, date: Date) -> i32 {
        age_between(self.birth_date, date)
    }

    pub fn age(&self) -> i32 {
        self.age_on(OffsetDateTime::now_utc().date())
    }
}

/// Whole years elapsed from `birth` to `on`, counting a year only once its
/// birthday has passed.
pub fn age_between(birth: Date, on: Date) -> i32 {
    let mut age = on.year() - birth.year();
    if (on.month() as u8, on.day()) < (birth.month() as u8, birth.day()) {
        age -= 1;
    }
    age
}
