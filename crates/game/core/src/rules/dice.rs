//! Dice expressions such as `1d8` or `1d4+1`.

use core::fmt;
use core::str::FromStr;

use crate::env::Roller;

/// A dice expression: `count` dice with `sides` faces plus a flat `bonus`.
///
/// Files spell it the way players do, e.g. `"2d4+1"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Dice {
    pub count: u8,
    pub sides: u8,
    pub bonus: i8,
}

impl Dice {
    pub const fn new(count: u8, sides: u8, bonus: i8) -> Self {
        Self {
            count,
            sides,
            bonus,
        }
    }

    /// Smallest possible total.
    pub const fn min(&self) -> i32 {
        self.count as i32 + self.bonus as i32
    }

    /// Largest possible total.
    pub const fn max(&self) -> i32 {
        self.count as i32 * self.sides as i32 + self.bonus as i32
    }

    /// Rolls every die through `roller`; each die consumes one roll context.
    pub fn roll(&self, roller: &mut Roller<'_>) -> i32 {
        let mut total = self.bonus as i32;
        for _ in 0..self.count {
            total += roller.roll_die(u32::from(self.sides)) as i32;
        }
        total
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

/// Errors produced while parsing a dice expression.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceParseError {
    #[error("dice expression is missing the 'd' separator: {0:?}")]
    MissingSeparator(String),

    #[error("invalid number in dice expression: {0:?}")]
    InvalidNumber(String),

    #[error("dice must have at least one die with at least one side")]
    Empty,
}

impl FromStr for Dice {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let (count_part, rest) = text
            .split_once('d')
            .ok_or_else(|| DiceParseError::MissingSeparator(s.to_string()))?;

        let count = if count_part.is_empty() {
            1
        } else {
            parse_number::<u8>(count_part)?
        };

        let (sides_part, bonus) = match rest.find(['+', '-']) {
            Some(index) => {
                let (sides, modifier) = rest.split_at(index);
                let (sign, digits) = modifier.split_at(1);
                if digits.trim_start().starts_with(['+', '-']) {
                    return Err(DiceParseError::InvalidNumber(modifier.to_string()));
                }
                let magnitude = i16::from(parse_number::<u8>(digits)?);
                let signed = if sign == "-" { -magnitude } else { magnitude };
                let bonus = i8::try_from(signed)
                    .map_err(|_| DiceParseError::InvalidNumber(modifier.to_string()))?;
                (sides, bonus)
            }
            None => (rest, 0),
        };

        let sides = parse_number::<u8>(sides_part)?;
        if count == 0 || sides == 0 {
            return Err(DiceParseError::Empty);
        }

        Ok(Dice::new(count, sides, bonus))
    }
}

impl TryFrom<String> for Dice {
    type Error = DiceParseError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Dice> for String {
    fn from(dice: Dice) -> Self {
        dice.to_string()
    }
}

fn parse_number<T: FromStr>(text: &str) -> Result<T, DiceParseError> {
    text.trim()
        .parse()
        .map_err(|_| DiceParseError::InvalidNumber(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::CombatantId;

    #[test]
    fn parses_common_expressions() {
        assert_eq!("1d8".parse::<Dice>().unwrap(), Dice::new(1, 8, 0));
        assert_eq!("1d4+1".parse::<Dice>().unwrap(), Dice::new(1, 4, 1));
        assert_eq!("2D6-1".parse::<Dice>().unwrap(), Dice::new(2, 6, -1));
        assert_eq!("d20".parse::<Dice>().unwrap(), Dice::new(1, 20, 0));
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(matches!(
            "8".parse::<Dice>(),
            Err(DiceParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            "1dx".parse::<Dice>(),
            Err(DiceParseError::InvalidNumber(_))
        ));
        assert_eq!("0d6".parse::<Dice>(), Err(DiceParseError::Empty));
        assert!(matches!(
            "1d4--128".parse::<Dice>(),
            Err(DiceParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "1d4+-3".parse::<Dice>(),
            Err(DiceParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "1d4+200".parse::<Dice>(),
            Err(DiceParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn bonus_limits_follow_i8() {
        assert_eq!("1d4-128".parse::<Dice>().unwrap(), Dice::new(1, 4, -128));
        assert_eq!("1d4+127".parse::<Dice>().unwrap(), Dice::new(1, 4, 127));
    }

    #[test]
    fn display_round_trips_bonus_sign() {
        assert_eq!(Dice::new(1, 4, 1).to_string(), "1d4+1");
        assert_eq!(Dice::new(2, 6, -1).to_string(), "2d6-1");
        assert_eq!(Dice::new(1, 8, 0).to_string(), "1d8");
    }

    #[test]
    fn rolls_stay_within_bounds() {
        let rng = PcgRng;
        let dice = Dice::new(2, 6, 1);
        for nonce in 0..200 {
            let mut roller = Roller::new(&rng, 42, nonce, CombatantId(1));
            let total = dice.roll(&mut roller);
            assert!((dice.min()..=dice.max()).contains(&total), "{total}");
        }
    }
}
