//! Deep links into native player apps.
//!
//! A scheme template such as `vlc://$durl` is expanded against a
//! [`LinkContext`]. Every substituted value is escaped, so the result is a
//! single opaque URI the OS can hand to whichever app owns the scheme.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Escape everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A known native player and the scheme it listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLinkTemplate {
    pub icon: &'static str,
    pub name: &'static str,
    pub scheme: &'static str,
}

pub const PLAYERS: [PlayerLinkTemplate; 6] = [
    PlayerLinkTemplate {
        icon: "nplayer",
        name: "nPlayer",
        scheme: "nplayer-$durl",
    },
    PlayerLinkTemplate {
        icon: "oplayer",
        name: "OPlayer",
        scheme: "oplayer://$durl",
    },
    PlayerLinkTemplate {
        icon: "iina",
        name: "IINA",
        scheme: "iina://weblink?url=$durl",
    },
    PlayerLinkTemplate {
        icon: "movist",
        name: "MovistPro",
        scheme: "movistpro:$mdurl",
    },
    PlayerLinkTemplate {
        icon: "vlc",
        name: "VLC",
        scheme: "vlc://$durl",
    },
    PlayerLinkTemplate {
        icon: "infuse",
        name: "Infuse",
        scheme: "infuse://x-callback-url/play?url=$durl",
    },
];

/// Values a template may reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkContext {
    pub raw_url: String,
    pub name: String,
    /// Link to the current file, proxied when a proxy base is configured.
    pub d_url: String,
}

#[derive(Debug, Clone, Copy)]
enum Token {
    MdUrl,
    DUrl,
    Name,
    Url,
}

// Longest literal first.
const TOKENS: [Token; 4] = [Token::MdUrl, Token::DUrl, Token::Name, Token::Url];

impl Token {
    fn literal(self) -> &'static str {
        match self {
            Token::MdUrl => "$mdurl",
            Token::DUrl => "$durl",
            Token::Name => "$name",
            Token::Url => "$url",
        }
    }

    fn render(self, ctx: &LinkContext) -> String {
        match self {
            Token::MdUrl => encode_mdurl(&ctx.d_url),
            Token::DUrl => encode_component(&ctx.d_url),
            Token::Name => encode_component(&ctx.name),
            Token::Url => encode_component(&ctx.raw_url),
        }
    }
}

/// Expand every known `$token` in `template`. Unknown tokens stay as written.
pub fn format_link(template: &str, ctx: &LinkContext) -> String {
    let mut out = String::with_capacity(template.len() + ctx.d_url.len() * 2);
    let mut rest = template;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        match TOKENS.iter().find(|t| tail.starts_with(t.literal())) {
            Some(token) => {
                out.push_str(&token.render(ctx));
                rest = &tail[token.literal().len()..];
            }
            None => {
                out.push('$');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Inverse of [`encode_component`]. `None` if the bytes are not UTF-8.
pub fn decode_component(value: &str) -> Option<String> {
    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// `$mdurl` form: URL-safe base64 without padding. Needs no further escaping.
pub fn encode_mdurl(value: &str) -> String {
    URL_SAFE_NO_PAD.encode(value.as_bytes())
}

pub fn decode_mdurl(value: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    String::from_utf8(bytes).ok()
}

/// A rendered deep link for one native player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalLink {
    pub icon: &'static str,
    pub name: &'static str,
    pub href: String,
}

pub fn external_links(ctx: &LinkContext) -> Vec<ExternalLink> {
    PLAYERS
        .iter()
        .map(|p| ExternalLink {
            icon: p.icon,
            name: p.name,
            href: format_link(p.scheme, ctx),
        })
        .collect()
}
