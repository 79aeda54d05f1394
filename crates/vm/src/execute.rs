//! Fetch-execute loop and instruction dispatch for the Spindle machine.
//!
//! Each step fetches the token under the program counter, decodes it (total:
//! unknown tokens are no-ops), runs the handler against the machine state,
//! and advances the counter by one token unless the handler repositioned it.
//!
//! Domain arithmetic errors are recoverable per instruction: a handler whose
//! numeric result would be non-finite discards the result, leaves the state
//! unchanged, and lets execution continue. Only unmatched loop tokens abort
//! a run.

use spindle_common::{Cell, Opcode};
use tracing::trace;

use crate::error::AbortKind;
use crate::machine::{Machine, Status};

/// Primitive actions the randomized instructions choose between.
#[derive(Clone, Copy)]
enum Prim {
    Forward,
    Backward,
    Increment,
    Decrement,
}

/// Remainder following the divisor's sign (floor convention).
fn floor_mod(a: Cell, b: Cell) -> Cell {
    a - b * (a / b).floor()
}

/// n! as a cell value. 171! already exceeds the largest finite cell, so
/// larger operands short-circuit to infinity (which the caller discards).
fn factorial(n: u64) -> Cell {
    if n > 170 {
        return f64::INFINITY;
    }
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

impl Machine {
    /// Execute one instruction. Returns the machine's status afterwards, or
    /// the abort reason for a malformed program.
    ///
    /// Calling `step` on a halted machine is a no-op returning
    /// [`Status::Halted`].
    pub fn step(&mut self) -> Result<Status, AbortKind> {
        let Some(token) = self.program.get(self.pc) else {
            return Ok(Status::Halted);
        };
        let cur = self.pc;
        self.pc = cur + 1;
        self.exec(Opcode::from_token(token), cur)?;
        Ok(if self.pc < self.program.len() {
            Status::Running
        } else {
            Status::Halted
        })
    }

    fn exec(&mut self, op: Opcode, cur: usize) -> Result<(), AbortKind> {
        match op {
            Opcode::Nop => {}

            // ---- Cursor movement (circular) ----
            Opcode::Forward => self.tape.move_by(1),
            Opcode::ForwardFive => self.tape.move_by(5),
            Opcode::ForwardTen => self.tape.move_by(10),
            Opcode::ForwardSquared => {
                let n = self.tape.current();
                self.tape.move_by((n * n).trunc() as i64);
            }
            Opcode::Backward => self.tape.move_by(-1),
            Opcode::BackwardFive => self.tape.move_by(-5),
            Opcode::BackwardTen => self.tape.move_by(-10),
            Opcode::BackwardSquared => {
                let n = self.tape.current();
                self.tape.move_by(0i64.saturating_sub((n * n).trunc() as i64));
            }
            Opcode::ForwardByCell => self.tape.move_by(self.tape.current() as i64),
            Opcode::BackwardByCell => {
                let delta = 0i64.saturating_sub(self.tape.current() as i64);
                self.tape.move_by(delta);
            }

            // ---- Cursor placement (clamped) ----
            Opcode::SeekStart => self.tape.move_to(0),
            Opcode::SeekEnd => {
                let last = self.tape.len() as i64 - 1;
                self.tape.move_to(last);
            }
            Opcode::SeekFromOutput => {
                let index = self.output.last().copied().unwrap_or(0.0);
                self.tape.move_to(index as i64);
            }

            // ---- Accumulation ----
            Opcode::Increment => self.unary_op(cur, |x| x + 1.0),
            Opcode::AddFive => self.unary_op(cur, |x| x + 5.0),
            Opcode::AddTen => self.unary_op(cur, |x| x + 10.0),
            Opcode::Decrement => self.unary_op(cur, |x| x - 1.0),
            Opcode::SubFive => self.unary_op(cur, |x| x - 5.0),
            Opcode::SubTen => self.unary_op(cur, |x| x - 10.0),
            Opcode::Double => self.unary_op(cur, |x| 2.0 * x),
            Opcode::Halve => self.unary_op(cur, |x| 0.5 * x),

            // ---- Loop construct ----
            Opcode::LoopEntry => {
                if self.tape.current() == 0.0 {
                    let exit = self
                        .matching_exit(cur)
                        .ok_or(AbortKind::UnmatchedLoopEntry { at: cur })?;
                    self.pc = exit + 1;
                }
            }
            Opcode::LoopExit => {
                if self.tape.current() != 0.0 {
                    let entry = self
                        .matching_entry(cur)
                        .ok_or(AbortKind::UnmatchedLoopExit { at: cur })?;
                    self.pc = entry + 1;
                }
            }

            // ---- Tape shape ----
            Opcode::GrowOne => self.tape.grow(1),
            Opcode::GrowTen => self.tape.grow(10),
            Opcode::ShrinkOne => self.tape.shrink(1),
            Opcode::ShrinkTen => self.tape.shrink(10),
            Opcode::InsertCell => self.tape.insert_after_cursor(0.0),
            Opcode::DeleteCell => {
                if self.tape.delete_at_cursor().is_none() {
                    trace!(target: "spindle::vm", pc = cur, "delete of last cell rejected");
                }
            }
            Opcode::DeleteToOutput => match self.tape.delete_at_cursor() {
                Some(value) => self.output.push(value),
                None => {
                    trace!(target: "spindle::vm", pc = cur, "delete of last cell rejected");
                }
            },

            // ---- Output buffer ----
            Opcode::WriteCell => self.output.push(self.tape.current()),
            Opcode::WriteCursor => self.output.push(self.tape.cursor() as Cell),
            Opcode::WriteCounter => self.output.push(cur as Cell),
            Opcode::PopBack => {
                let value = self.output.pop().unwrap_or(0.0);
                self.tape.set_current(value);
            }
            Opcode::PeekBack => {
                let value = self.output.last().copied().unwrap_or(0.0);
                self.tape.set_current(value);
            }
            Opcode::PopFront => {
                let value = if self.output.is_empty() {
                    0.0
                } else {
                    self.output.remove(0)
                };
                self.tape.set_current(value);
            }
            Opcode::PeekFront => {
                let value = self.output.first().copied().unwrap_or(0.0);
                self.tape.set_current(value);
            }
            Opcode::DropFront => {
                if !self.output.is_empty() {
                    self.output.remove(0);
                }
            }
            Opcode::DropBack => {
                self.output.pop();
            }
            Opcode::ReverseOutput => self.output.reverse(),

            // ---- Input queue ----
            Opcode::ReadInput => {
                let value = self.input.pop_front().unwrap_or(0.0);
                self.tape.set_current(value);
            }
            Opcode::PeekInput => {
                let value = self.input.front().copied().unwrap_or(0.0);
                self.tape.set_current(value);
            }

            // ---- Program counter ----
            // Skips land n+1 tokens ahead so the intervening n instructions
            // do not execute; rewinds land n-1 tokens back, the symmetric
            // move measured before the implicit advance. Guards refuse the
            // move rather than wrap.
            Opcode::SkipOne => {
                if cur + 1 < self.program.len() {
                    self.pc = cur + 2;
                }
            }
            Opcode::SkipFive => {
                if cur + 5 < self.program.len() {
                    self.pc = cur + 6;
                }
            }
            Opcode::SkipTen => {
                if cur + 10 < self.program.len() {
                    self.pc = cur + 11;
                }
            }
            Opcode::RewindOne => {
                // A one-token rewind lands back on this instruction.
                if cur >= 1 {
                    self.pc = cur;
                }
            }
            Opcode::RewindFive => {
                if cur >= 5 {
                    self.pc = cur - 4;
                }
            }
            Opcode::RewindTen => {
                if cur >= 10 {
                    self.pc = cur - 9;
                }
            }
            Opcode::SkipIfZero => {
                if self.tape.current() == 0.0 {
                    self.pc = cur + 2;
                }
            }
            Opcode::SkipByCell => {
                let n = (self.tape.current() as i64).unsigned_abs() as usize;
                if let Some(target) = cur.checked_add(n) {
                    if target < self.program.len() {
                        self.pc = target + 1;
                    }
                }
            }

            // ---- Set value ----
            Opcode::SetZero => self.tape.set_current(0.0),
            Opcode::SetMinusOne => self.tape.set_current(-1.0),
            Opcode::SetOne => self.tape.set_current(1.0),
            Opcode::SetPi => self.tape.set_current(std::f64::consts::PI),
            Opcode::SetE => self.tape.set_current(std::f64::consts::E),

            // ---- Whole-sequence reversal ----
            Opcode::ReverseTape => self.tape.reverse_whole(),
            Opcode::ReverseProgram => self.program.reverse(),

            // ---- Tape manipulation ----
            Opcode::SwapNext => {
                let i = self.tape.cursor();
                let j = self.tape.next_index();
                self.tape.swap(i, j);
            }
            Opcode::ReverseSuffix => self.tape.reverse_suffix_after_cursor(),

            // ---- Arithmetic against the next cell ----
            Opcode::AddNext => self.next_cell_op(cur, |cell, next| cell + next),
            Opcode::SubNext => self.next_cell_op(cur, |cell, next| next - cell),
            Opcode::MulNext => self.next_cell_op(cur, |cell, next| next * cell),
            Opcode::DivNext => self.next_cell_op(cur, |cell, next| next / cell),
            Opcode::ModNext => self.next_cell_op(cur, |cell, next| floor_mod(next, cell)),
            Opcode::PowNext => self.next_cell_op(cur, |cell, next| cell.powf(next)),
            Opcode::RootNext => {
                let next = self.tape.next();
                if next == 0.0 {
                    trace!(target: "spindle::vm", pc = cur, "zeroth root skipped");
                } else {
                    let value = self.tape.current().powf(1.0 / next);
                    self.store_finite(cur, value);
                }
            }
            Opcode::Hypot => self.next_cell_op(cur, |cell, next| cell.hypot(next)),
            Opcode::LogNext => self.next_cell_op(cur, |cell, next| cell.log(next)),

            // ---- Arithmetic against the input queue ----
            Opcode::AddInputFront => self.input_front_op(cur, |cell, x| cell + x),
            Opcode::AddInputBack => self.input_back_op(cur, |cell, x| cell + x),
            Opcode::SubInputFront => self.input_front_op(cur, |cell, x| x - cell),
            Opcode::SubInputBack => self.input_back_op(cur, |cell, x| x - cell),
            Opcode::MulInputFront => self.input_front_op(cur, |cell, x| x * cell),
            Opcode::MulInputBack => self.input_back_op(cur, |cell, x| x * cell),
            Opcode::DivInputFront => self.input_front_op(cur, |cell, x| x / cell),
            Opcode::DivInputBack => self.input_back_op(cur, |cell, x| x / cell),
            Opcode::ModInputFront => self.input_front_op(cur, |cell, x| floor_mod(x, cell)),
            Opcode::ModInputBack => self.input_back_op(cur, |cell, x| floor_mod(x, cell)),

            // ---- Unary math ----
            Opcode::Truncate => self.unary_op(cur, |x| x.trunc()),
            Opcode::Negate => self.unary_op(cur, |x| -x),
            Opcode::Sin => self.unary_op(cur, |x| x.sin()),
            Opcode::Cos => self.unary_op(cur, |x| x.cos()),
            Opcode::Tan => self.unary_op(cur, |x| x.tan()),
            Opcode::Asin => self.unary_op(cur, |x| x.asin()),
            Opcode::Acos => self.unary_op(cur, |x| x.acos()),
            Opcode::Atan => self.unary_op(cur, |x| x.atan()),
            Opcode::Reciprocal => self.unary_op(cur, |x| 1.0 / x),
            Opcode::Sqrt => self.unary_op(cur, |x| x.sqrt()),
            Opcode::Ln => self.unary_op(cur, |x| x.ln()),
            Opcode::Sinh => self.unary_op(cur, |x| x.sinh()),
            Opcode::Cosh => self.unary_op(cur, |x| x.cosh()),
            Opcode::Tanh => self.unary_op(cur, |x| x.tanh()),
            Opcode::Asinh => self.unary_op(cur, |x| x.asinh()),
            Opcode::Acosh => self.unary_op(cur, |x| x.acosh()),
            Opcode::Atanh => self.unary_op(cur, |x| x.atanh()),
            Opcode::ToDegrees => self.unary_op(cur, |x| x.to_degrees()),
            Opcode::ToRadians => self.unary_op(cur, |x| x.to_radians()),
            Opcode::PowE => self.unary_op(cur, |x| x.powf(std::f64::consts::E)),
            Opcode::ExpE => self.unary_op(cur, |x| x.exp()),
            Opcode::ExpTen => self.unary_op(cur, |x| 10.0f64.powf(x)),
            Opcode::Erf => self.unary_op(cur, libm::erf),
            Opcode::Erfc => self.unary_op(cur, libm::erfc),
            Opcode::Factorial => {
                let x = self.tape.current();
                if x >= 0.0 {
                    self.store_finite(cur, factorial(x as u64));
                } else {
                    trace!(target: "spindle::vm", pc = cur, "negative factorial skipped");
                }
            }
            Opcode::FactorialAbs => {
                let n = (self.tape.current() as i64).unsigned_abs();
                self.store_finite(cur, factorial(n));
            }

            // ---- Logic ----
            Opcode::And => self.logic_op(|_, _, x, y| x && y),
            Opcode::Or => self.logic_op(|_, _, x, y| x || y),
            Opcode::Not => self.logic_op(|_, _, x, _| !x),
            Opcode::Lt => self.logic_op(|a, b, _, _| a < b),
            Opcode::Gt => self.logic_op(|a, b, _, _| a > b),
            Opcode::Eq => self.logic_op(|a, b, _, _| a == b),
            Opcode::Neq => self.logic_op(|a, b, _, _| a != b),
            Opcode::Lte => self.logic_op(|a, b, _, _| a <= b),
            Opcode::Gte => self.logic_op(|a, b, _, _| a >= b),
            Opcode::Nand => self.logic_op(|_, _, x, y| !(x && y)),
            Opcode::Nor => self.logic_op(|_, _, x, y| !(x || y)),

            // ---- Randomized ----
            Opcode::RandIncFwd => self.random_op(&[Prim::Increment, Prim::Forward]),
            Opcode::RandDecBack => self.random_op(&[Prim::Decrement, Prim::Backward]),
            Opcode::RandFwdBack => self.random_op(&[Prim::Forward, Prim::Backward]),
            Opcode::RandIncDec => self.random_op(&[Prim::Increment, Prim::Decrement]),
            Opcode::RandDecFwd => self.random_op(&[Prim::Decrement, Prim::Forward]),
            Opcode::RandIncBack => self.random_op(&[Prim::Increment, Prim::Backward]),
            Opcode::RandFwdDecBack => {
                self.random_op(&[Prim::Forward, Prim::Decrement, Prim::Backward])
            }
            Opcode::RandIncDecFwd => {
                self.random_op(&[Prim::Increment, Prim::Decrement, Prim::Forward])
            }
            Opcode::RandIncDecBack => {
                self.random_op(&[Prim::Increment, Prim::Decrement, Prim::Backward])
            }
            Opcode::RandIncFwdBack => {
                self.random_op(&[Prim::Increment, Prim::Forward, Prim::Backward])
            }
            Opcode::RandAny => self.random_op(&[
                Prim::Increment,
                Prim::Decrement,
                Prim::Forward,
                Prim::Backward,
            ]),
        }

        Ok(())
    }

    /// Store a computed value under the cursor unless it is non-finite, in
    /// which case the instruction degrades to a no-op.
    fn store_finite(&mut self, cur: usize, value: Cell) {
        if value.is_finite() {
            self.tape.set_current(value);
        } else {
            trace!(target: "spindle::vm", pc = cur, "non-finite result discarded");
        }
    }

    fn unary_op(&mut self, cur: usize, f: impl FnOnce(Cell) -> Cell) {
        let value = f(self.tape.current());
        self.store_finite(cur, value);
    }

    /// Binary operation over (current cell, next cell), circular.
    fn next_cell_op(&mut self, cur: usize, f: impl FnOnce(Cell, Cell) -> Cell) {
        let value = f(self.tape.current(), self.tape.next());
        self.store_finite(cur, value);
    }

    /// Binary operation over (current cell, front of input). The queue is
    /// peeked, not consumed; an empty queue makes the instruction a no-op.
    fn input_front_op(&mut self, cur: usize, f: impl FnOnce(Cell, Cell) -> Cell) {
        let front = self.input.front().copied();
        if let Some(x) = front {
            let value = f(self.tape.current(), x);
            self.store_finite(cur, value);
        }
    }

    /// As [`Machine::input_front_op`], against the back of the queue.
    fn input_back_op(&mut self, cur: usize, f: impl FnOnce(Cell, Cell) -> Cell) {
        let back = self.input.back().copied();
        if let Some(x) = back {
            let value = f(self.tape.current(), x);
            self.store_finite(cur, value);
        }
    }

    /// Logic operation over the current and next cell. The closure sees the
    /// raw values and their truthiness (value > 0); the result is stored as
    /// exactly 0 or 1.
    fn logic_op(&mut self, f: impl FnOnce(Cell, Cell, bool, bool) -> bool) {
        let x = self.tape.current();
        let y = self.tape.next();
        let result = f(x, y, x > 0.0, y > 0.0);
        self.tape.set_current(if result { 1.0 } else { 0.0 });
    }

    /// Pick one primitive with even probability and execute it.
    fn random_op(&mut self, arms: &[Prim]) {
        let r = self.rng.next_unit();
        let pick = ((r * arms.len() as f64) as usize).min(arms.len() - 1);
        match arms[pick] {
            Prim::Forward => self.tape.move_by(1),
            Prim::Backward => self.tape.move_by(-1),
            Prim::Increment => {
                let value = self.tape.current() + 1.0;
                self.tape.set_current(value);
            }
            Prim::Decrement => {
                let value = self.tape.current() - 1.0;
                self.tape.set_current(value);
            }
        }
    }

    /// Token index of the loop exit matching the entry at `entry`, tracking
    /// nesting depth on a forward scan.
    fn matching_exit(&self, entry: usize) -> Option<usize> {
        let mut depth = 1usize;
        for i in entry + 1..self.program.len() {
            match Opcode::from_token(self.program.get(i)?) {
                Opcode::LoopEntry => depth += 1,
                Opcode::LoopExit => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Token index of the loop entry matching the exit at `exit`, tracking
    /// nesting depth on a backward scan.
    fn matching_entry(&self, exit: usize) -> Option<usize> {
        let mut depth = 1usize;
        for i in (0..exit).rev() {
            match Opcode::from_token(self.program.get(i)?) {
                Opcode::LoopExit => depth += 1,
                Opcode::LoopEntry => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }
}
