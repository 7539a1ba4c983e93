use std::{
    fmt::{Display, Formatter, Result as FmtResult, Write},
    slice::Iter,
    str::FromStr,
};

use chumsky::Parser;

use super::parsers;
use crate::address::{Address, AddressError};

/// Represents an email address with an optional name for the sender/recipient.
///
/// This type contains email address and the sender/recipient name (_Some Name \<user@domain.tld\>_ or _withoutname@domain.tld_).
///
/// # Examples
///
/// ```
/// # use lettre_mandrill::{Address, Mailbox};
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mailbox: Mailbox = "John Smith <example@email.com>".parse()?;
/// assert_eq!(mailbox.name.as_deref(), Some("John Smith"));
/// assert_eq!(mailbox.email, Address::new("example", "email.com")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Mailbox {
    /// The name associated with the address.
    pub name: Option<String>,

    /// The email address itself.
    pub email: Address,
}

impl Mailbox {
    /// Creates a new `Mailbox` using an email address and the name of the recipient if there is one.
    pub fn new(name: Option<String>, email: Address) -> Self {
        Mailbox { name, email }
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(name) = &self.name {
            let name = name.trim();
            if !name.is_empty() {
                write_word(f, name)?;
                f.write_str(" <")?;
                self.email.fmt(f)?;
                return f.write_char('>');
            }
        }
        self.email.fmt(f)
    }
}

impl<S: Into<String>, T: Into<String>> TryFrom<(S, T)> for Mailbox {
    type Error = AddressError;

    fn try_from(header: (S, T)) -> Result<Self, Self::Error> {
        let (name, address) = header;
        Ok(Mailbox::new(Some(name.into()), address.into().parse()?))
    }
}

impl FromStr for Mailbox {
    type Err = AddressError;

    fn from_str(src: &str) -> Result<Mailbox, Self::Err> {
        let (name, address) = parsers::mailbox()
            .parse(src)
            .map_err(|_errs| AddressError::InvalidInput)?;

        Ok(Mailbox::new(name, address.parse()?))
    }
}

impl From<Address> for Mailbox {
    fn from(value: Address) -> Self {
        Self::new(None, value)
    }
}

/// Represents a sequence of [`Mailbox`] instances, in the order they were added.
#[derive(Debug, Clone, Default, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Mailboxes(Vec<Mailbox>);

impl Mailboxes {
    /// Creates a new empty list of [`Mailbox`] instances.
    pub fn new() -> Self {
        Mailboxes(Vec::new())
    }

    /// Adds a new [`Mailbox`] to the list, in a builder style pattern.
    pub fn with(mut self, mbox: Mailbox) -> Self {
        self.0.push(mbox);
        self
    }

    /// Adds a new [`Mailbox`] to the list, in a `Vec::push` style pattern.
    pub fn push(&mut self, mbox: Mailbox) {
        self.0.push(mbox);
    }

    /// Returns the first [`Mailbox`], if any.
    pub fn first(&self) -> Option<&Mailbox> {
        self.0.first()
    }

    /// Number of mailboxes in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the list holds no mailbox.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Creates an iterator over the [`Mailbox`] instances that are currently stored.
    pub fn iter(&self) -> Iter<'_, Mailbox> {
        self.0.iter()
    }
}

impl From<Mailbox> for Mailboxes {
    fn from(mailbox: Mailbox) -> Self {
        Mailboxes(vec![mailbox])
    }
}

impl From<Vec<Mailbox>> for Mailboxes {
    fn from(vec: Vec<Mailbox>) -> Self {
        Mailboxes(vec)
    }
}

impl From<Mailboxes> for Vec<Mailbox> {
    fn from(mailboxes: Mailboxes) -> Vec<Mailbox> {
        mailboxes.0
    }
}

impl FromIterator<Mailbox> for Mailboxes {
    fn from_iter<T: IntoIterator<Item = Mailbox>>(iter: T) -> Self {
        Self(Vec::from_iter(iter))
    }
}

impl Extend<Mailbox> for Mailboxes {
    fn extend<T: IntoIterator<Item = Mailbox>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Mailboxes {
    type Item = Mailbox;
    type IntoIter = ::std::vec::IntoIter<Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mailboxes {
    type Item = &'a Mailbox;
    type IntoIter = Iter<'a, Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Mailboxes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut iter = self.iter();

        if let Some(mbox) = iter.next() {
            mbox.fmt(f)?;

            for mbox in iter {
                f.write_str(", ")?;
                mbox.fmt(f)?;
            }
        }

        Ok(())
    }
}

impl FromStr for Mailboxes {
    type Err = AddressError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let parsed = parsers::mailbox_list()
            .parse(src)
            .map_err(|_errs| AddressError::InvalidInput)?;

        parsed
            .into_iter()
            .map(|(name, address)| Ok(Mailbox::new(name, address.parse()?)))
            .collect()
    }
}

// https://datatracker.ietf.org/doc/html/rfc2822#section-3.2.6
fn write_word(f: &mut Formatter<'_>, s: &str) -> FmtResult {
    if s.bytes().all(is_valid_atom_char) {
        f.write_str(s)
    } else {
        f.write_char('"')?;
        for c in s.chars() {
            if matches!(c, '"' | '\\') {
                f.write_char('\\')?;
            }
            f.write_char(c)?;
        }
        f.write_char('"')
    }
}

// atext plus the spaces that may sit between atoms
fn is_valid_atom_char(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            b'\t'
                | b' '
                | b'!'
                | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'/'
                | b'='
                | b'?'
                | b'^'
                | b'_'
                | b'`'
                | b'{'
                | b'|'
                | b'}'
                | b'~'
                | 128..=255
        )
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Mailbox, Mailboxes};
    use crate::address::AddressError;

    #[test]
    fn mailbox_format_address_only() {
        let mailbox: Mailbox = "kayo@example.com".parse().unwrap();
        assert_eq!(mailbox.name, None);
        assert_eq!(mailbox.to_string(), "kayo@example.com");
    }

    #[test]
    fn mailbox_format_quotes_specials() {
        let mailbox = Mailbox::try_from(("Smith, John", "john@example.com")).unwrap();
        assert_eq!(mailbox.to_string(), "\"Smith, John\" <john@example.com>");
    }

    #[test]
    fn mailbox_blank_name_is_dropped() {
        let mailbox: Mailbox = "\"  \" <kayo@example.com>".parse().unwrap();
        assert_eq!(mailbox.name, None);
    }

    #[test]
    fn mailbox_invalid_address() {
        assert_eq!(
            "Kayo <kayo@exa mple.com>".parse::<Mailbox>(),
            Err(AddressError::InvalidDomain)
        );
        assert_eq!(
            "Kayo kayo@example.com".parse::<Mailbox>(),
            Err(AddressError::InvalidInput)
        );
    }

    #[test]
    fn mailboxes_keep_order() {
        let mailboxes: Mailboxes = "b@example.com, A <a@example.com>".parse().unwrap();
        let emails: Vec<&str> = mailboxes.iter().map(|m| m.email.as_ref()).collect();
        assert_eq!(emails, ["b@example.com", "a@example.com"]);
        assert_eq!(mailboxes.first().unwrap().email.as_ref(), "b@example.com");
        assert_eq!(mailboxes.to_string(), "b@example.com, A <a@example.com>");
    }
}
