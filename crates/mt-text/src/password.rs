//! Random passwords.

use std::str::FromStr;

use rand::rngs::OsRng;
use rand::Rng;

const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_+=[]{}<>?,.~";

/// Characters a password is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Letters and digits.
    Simple,
    /// Letters, digits and symbols.
    #[default]
    Advanced,
}

impl Charset {
    pub fn chars(&self) -> Vec<char> {
        match self {
            Self::Simple => ALPHANUMERIC.chars().collect(),
            Self::Advanced => SYMBOLS.chars().chain(ALPHANUMERIC.chars()).collect(),
        }
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "adv" | "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown charset {:?}, expected simple or adv", other)),
        }
    }
}

/// A password of `length` characters from the OS random source.
pub fn generate_password(length: usize, charset: Charset) -> String {
    generate_with(&mut OsRng, length, charset)
}

fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: usize, charset: Charset) -> String {
    let chars = charset.chars();
    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_password() {
        let pw = generate_password(24, Charset::Simple);
        assert_eq!(pw.chars().count(), 24);
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(generate_password(0, Charset::Advanced), "");
    }

    #[test]
    fn test_every_char_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let pw = generate_with(&mut rng, 20_000, Charset::Advanced);
        for c in Charset::Advanced.chars() {
            assert!(pw.contains(c), "missing {:?}", c);
        }
    }

    #[test]
    fn test_charset_from_str() {
        assert_eq!("simple".parse::<Charset>(), Ok(Charset::Simple));
        assert_eq!("adv".parse::<Charset>(), Ok(Charset::Advanced));
        assert!("emoji".parse::<Charset>().is_err());
        assert_eq!(Charset::Advanced.chars().len(), 86);
    }
}
