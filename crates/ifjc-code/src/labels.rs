//! Unique label generation for `if`/`while` emission.
//!
//! The top-down parser needs a fresh, collision-free label pair every
//! time it emits a conditional or a loop; a monotonically increasing
//! counter per construct kind (mirroring the `cond_cnt`/`loop_cnt`
//! counters of the original generator) is sufficient since labels never
//! need to be freed or reused.

#[derive(Default)]
pub struct LabelGen {
    cond_cnt: u32,
    loop_cnt: u32,
}

impl LabelGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(else_label, end_label)` for the next `if`/`elseif` chain link.
    pub fn next_cond(&mut self) -> (String, String) {
        let n = self.cond_cnt;
        self.cond_cnt += 1;
        (format!("$else{n}"), format!("$endif{n}"))
    }

    /// `(start_label, end_label)` for the next `while` loop.
    pub fn next_loop(&mut self) -> (String, String) {
        let n = self.loop_cnt;
        self.loop_cnt += 1;
        (format!("$loop{n}"), format!("$endloop{n}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_conditionals_get_distinct_labels() {
        let mut gen = LabelGen::new();
        let (else0, end0) = gen.next_cond();
        let (else1, end1) = gen.next_cond();
        assert_ne!(else0, else1);
        assert_ne!(end0, end1);
    }

    #[test]
    fn loop_and_cond_counters_are_independent() {
        let mut gen = LabelGen::new();
        let (loop0, _) = gen.next_loop();
        let (else0, _) = gen.next_cond();
        assert_eq!(loop0, "$loop0");
        assert_eq!(else0, "$else0");
    }
}
