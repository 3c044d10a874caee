//! String literal unescaping.
//!
//! Adapted from the snailquote-derived unescaper the teacher carries in
//! `ast::lit2`, retargeted at single-quoted Quark string literals.

/// Strips the surrounding quotes and resolves escape sequences. Returns
/// `None` on an incomplete `\x`/`\u{...}` escape; an unrecognized escape
/// letter is passed through verbatim (the backslash and the letter both
/// survive), matching the teacher's behavior.
pub fn unescape(lexeme: &str) -> Option<String> {
  let body = lexeme.strip_prefix('\'').unwrap_or(lexeme);
  let body = body.strip_suffix('\'').unwrap_or(body);

  let mut out = String::with_capacity(body.len());
  let mut chars = body.chars();
  while let Some(ch) = chars.next() {
    if ch != '\\' {
      out.push(ch);
      continue;
    }
    let Some(next) = chars.next() else {
      out.push(ch);
      break;
    };
    let escape = match next {
      'a' => Some('\u{07}'),
      'b' => Some('\u{08}'),
      'v' => Some('\u{0B}'),
      'f' => Some('\u{0C}'),
      'n' => Some('\n'),
      'r' => Some('\r'),
      't' => Some('\t'),
      '\'' => Some('\''),
      '"' => Some('"'),
      '\\' => Some('\\'),
      'e' | 'E' => Some('\u{1B}'),
      'x' => Some(parse_hex_code(&mut chars)?),
      'u' => Some(parse_unicode(&mut chars)?),
      _ => None,
    };
    match escape {
      Some(esc) => out.push(esc),
      None => {
        out.push(ch);
        out.push(next);
      }
    }
  }
  Some(out)
}

fn parse_hex_code<I: Iterator<Item = char>>(chars: &mut I) -> Option<char> {
  let digits: String = [chars.next()?, chars.next()?].into_iter().collect();
  let c = u32::from_str_radix(&digits, 16).ok()?;
  char::from_u32(c)
}

fn parse_unicode<I: Iterator<Item = char>>(chars: &mut I) -> Option<char> {
  if chars.next() != Some('{') {
    return None;
  }
  let digits: String = chars.take_while(|&c| c != '}').collect();
  u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_string() {
    assert_eq!(unescape("'hello'").as_deref(), Some("hello"));
  }

  #[test]
  fn common_escapes() {
    assert_eq!(unescape(r"'a\nb\tc'").as_deref(), Some("a\nb\tc"));
    assert_eq!(unescape(r"'it\'s'").as_deref(), Some("it's"));
  }

  #[test]
  fn unicode_escape() {
    assert_eq!(unescape(r"'\u{1F600}'").as_deref(), Some("\u{1F600}"));
  }
}
