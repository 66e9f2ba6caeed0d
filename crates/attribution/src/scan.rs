//! Ordered `key=value` scanner shared by parameter and keyword extraction.
//!
//! Keys match ASCII case-insensitively anywhere in the haystack, not only at
//! parameter boundaries. A value runs to the next `&`, `#` or the end of the
//! input, and scanning resumes after it.

/// Iterator over `(key index, value)` matches in scan order.
pub(crate) struct PairScanner<'h, 'k> {
    haystack: &'h str,
    keys: &'k [&'k str],
    pos: usize,
}

impl<'h, 'k> PairScanner<'h, 'k> {
    pub(crate) fn new(haystack: &'h str, keys: &'k [&'k str]) -> Self {
        Self {
            haystack,
            keys,
            pos: 0,
        }
    }

    fn key_at(&self, at: usize) -> Option<usize> {
        let bytes = &self.haystack.as_bytes()[at..];
        self.keys.iter().position(|key| {
            let key = key.as_bytes();
            bytes.len() > key.len()
                && bytes[..key.len()].eq_ignore_ascii_case(key)
                && bytes[key.len()] == b'='
        })
    }
}

impl<'h> Iterator for PairScanner<'h, '_> {
    type Item = (usize, &'h str);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.haystack.len();
        while self.pos < len {
            let at = self.pos;
            let Some(idx) = self.key_at(at) else {
                self.pos += 1;
                continue;
            };
            let start = at + self.keys[idx].len() + 1;
            let end = self.haystack[start..]
                .find(['&', '#'])
                .map_or(len, |offset| start + offset);
            self.pos = end;
            return Some((idx, &self.haystack[start..end]));
        }
        None
    }
}
