use chumsky::prelude::*;

// Relaxed forms of the RFC 5322 `mailbox` rules: the address itself is
// validated afterwards by `Address`, so these only have to find the
// display name and the address.

// quoted-string   =  DQUOTE *(qtext / quoted-pair) DQUOTE
fn quoted_string() -> impl Parser<char, String, Error = Simple<char>> {
    let quoted_pair = just('\\').ignore_then(any());
    let qtext = none_of("\\\"\r\n");

    qtext
        .or(quoted_pair)
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
}

// phrase          =  1*word
fn phrase() -> impl Parser<char, String, Error = Simple<char>> {
    none_of("<>\",\r\n").repeated().at_least(1).collect::<String>()
}

// angle-addr      =  "<" addr-spec ">"
fn angle_addr() -> impl Parser<char, String, Error = Simple<char>> {
    none_of("<>")
        .repeated()
        .at_least(1)
        .collect::<String>()
        .delimited_by(just('<'), just('>'))
}

// addr-spec       =  local-part "@" domain
fn addr_spec() -> impl Parser<char, String, Error = Simple<char>> {
    filter(|c: &char| !c.is_whitespace() && !matches!(c, '<' | '>' | ','))
        .repeated()
        .at_least(1)
        .collect::<String>()
}

// mailbox         =  name-addr / addr-spec
// name-addr       =  [display-name] angle-addr
fn mailbox_item() -> impl Parser<char, (Option<String>, String), Error = Simple<char>> {
    let display_name = quoted_string().padded().or(phrase());

    let name_addr = display_name
        .or_not()
        .then(angle_addr().padded())
        .map(|(name, addr)| {
            let name = name
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty());
            (name, addr)
        });

    name_addr.or(addr_spec().map(|addr| (None, addr)))
}

pub(super) fn mailbox() -> impl Parser<char, (Option<String>, String), Error = Simple<char>> {
    mailbox_item().padded().then_ignore(end())
}

// mailbox-list    =  mailbox *("," mailbox)
pub(super) fn mailbox_list(
) -> impl Parser<char, Vec<(Option<String>, String)>, Error = Simple<char>> {
    mailbox_item()
        .padded()
        .separated_by(just(','))
        .at_least(1)
        .then_ignore(end())
}
