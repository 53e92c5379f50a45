//! Call-argument extraction for `Func` specs.

use crate::error::ParseError;

/// Verify that parentheses in `spec` are balanced, honoring string
/// literals. Returns the byte offsets of the first top-level `(` and its
/// matching `)`.
pub(crate) fn check_balance(spec: &str) -> Result<(usize, usize), ()> {
    let mut depth = 0usize;
    let mut open = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in spec.char_indices() {
        if in_string {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => in_string = false,
                _ => escaped = false,
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => {
                if depth == 0 && open.is_none() {
                    open = Some(i);
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(());
                }
                depth -= 1;
                if depth == 0 {
                    if let Some(o) = open {
                        // first top-level pair decides the argument list
                        return Ok((o, i));
                    }
                }
            }
            _ => {}
        }
    }
    Err(())
}

/// Extract the positional arguments of a `Func` spec by splitting the text
/// between the first matching parentheses on top-level commas. Nested
/// calls and quoted strings are kept intact.
pub fn split_call_args(spec: &str) -> Result<Vec<String>, ParseError> {
    if !spec.contains('(') {
        return Err(ParseError::MissingOpenParen(spec.to_string()));
    }
    let (open, close) =
        check_balance(spec).map_err(|()| ParseError::UnbalancedParens(spec.to_string()))?;
    let inner = &spec[open + 1..close];
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0usize;
    for (i, c) in inner.char_indices() {
        if in_string {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => in_string = false,
                _ => escaped = false,
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(inner[start..].trim().to_string());
    Ok(args)
}
