//! Glob Pattern Module
//!
//! Redis `KEYS`-style pattern matching used to enumerate keys for bulk invalidation.
//!
//! Supported syntax:
//! - `*` matches any run of characters, including none
//! - `?` matches exactly one character
//! - `[abc]`, `[a-z]`, `[^a]` / `[!a]` match one character from (or outside) a set
//! - `\x` matches `x` literally

// == Glob Match ==
/// Returns true if `text` matches the glob `pattern` in full.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut pi = 0;
    let mut ti = 0;
    // Pattern index just past the last `*`, and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < text.len() {
        if pattern.get(pi) == Some(&'*') {
            pi += 1;
            backtrack = Some((pi, ti));
            continue;
        }

        if pi < pattern.len() {
            if let Some(next) = match_one(&pattern, pi, text[ti]) {
                pi = next;
                ti += 1;
                continue;
            }
        }

        match backtrack {
            Some((star_pi, star_ti)) => {
                pi = star_pi;
                ti = star_ti + 1;
                backtrack = Some((star_pi, star_ti + 1));
            }
            None => return false,
        }
    }

    pattern[pi..].iter().all(|&c| c == '*')
}

/// Matches the single-character token at `pattern[pi]` against `c`,
/// returning the index of the following token on success.
fn match_one(pattern: &[char], pi: usize, c: char) -> Option<usize> {
    match pattern[pi] {
        '?' => Some(pi + 1),
        '\\' if pi + 1 < pattern.len() => (pattern[pi + 1] == c).then_some(pi + 2),
        '[' => match match_class(pattern, pi, c) {
            Some((matched, next)) => matched.then_some(next),
            // Unterminated class: treat `[` as a literal
            None => (c == '[').then_some(pi + 1),
        },
        literal => (literal == c).then_some(pi + 1),
    }
}

/// Evaluates the character class opening at `pattern[start] == '['`.
///
/// Returns whether `c` is accepted and the index past the closing `]`,
/// or None if the class is never closed.
fn match_class(pattern: &[char], start: usize, c: char) -> Option<(bool, usize)> {
    let mut i = start + 1;
    let negate = matches!(pattern.get(i), Some('^') | Some('!'));
    if negate {
        i += 1;
    }

    let mut matched = false;
    while i < pattern.len() {
        match pattern[i] {
            ']' => return Some((matched != negate, i + 1)),
            '\\' if i + 1 < pattern.len() => {
                matched |= pattern[i + 1] == c;
                i += 2;
            }
            lo if pattern.get(i + 1) == Some(&'-')
                && i + 2 < pattern.len()
                && pattern[i + 2] != ']' =>
            {
                let hi = pattern[i + 2];
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                matched |= lo <= c && c <= hi;
                i += 3;
            }
            other => {
                matched |= other == c;
                i += 1;
            }
        }
    }

    None
}
