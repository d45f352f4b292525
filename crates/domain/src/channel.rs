use serde::{Deserialize, Serialize};

/// One of the four independent input sources a trainee responds with.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
}

impl Channel {
    /// Canonical ordering, also the round-robin cycle order.
    pub const ALL: [Channel; 4] = [
        Channel::LeftHand,
        Channel::RightHand,
        Channel::LeftFoot,
        Channel::RightFoot,
    ];

    pub fn side(self) -> Side {
        match self {
            Channel::LeftHand | Channel::LeftFoot => Side::Left,
            Channel::RightHand | Channel::RightFoot => Side::Right,
        }
    }

    pub fn limb(self) -> Limb {
        match self {
            Channel::LeftHand | Channel::RightHand => Limb::Hand,
            Channel::LeftFoot | Channel::RightFoot => Limb::Foot,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::LeftHand => "left hand",
            Channel::RightHand => "right hand",
            Channel::LeftFoot => "left foot",
            Channel::RightFoot => "right foot",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Limb {
    Hand,
    Foot,
}

impl Limb {
    pub fn label(self) -> &'static str {
        match self {
            Limb::Hand => "hand",
            Limb::Foot => "foot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_and_limb_projections() {
        assert_eq!(Channel::LeftHand.side(), Side::Left);
        assert_eq!(Channel::RightFoot.side(), Side::Right);
        assert_eq!(Channel::RightHand.limb(), Limb::Hand);
        assert_eq!(Channel::LeftFoot.limb(), Limb::Foot);
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&Channel::LeftHand).unwrap();
        assert_eq!(json, "\"left-hand\"");
        let parsed: Channel = serde_json::from_str("\"right-foot\"").unwrap();
        assert_eq!(parsed, Channel::RightFoot);
    }
}
