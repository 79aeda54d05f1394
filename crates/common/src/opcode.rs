//! Opcode definitions for the Spindle instruction set.
//!
//! Programs are flat strings of fixed-width decimal tokens in `000..=999`.
//! Only a fraction of that space is assigned; every unassigned token decodes
//! to [`Opcode::Nop`], so dispatch is total and the space leaves room for
//! future instructions.

/// Identifies the operation a token selects.
///
/// Decoding never fails: [`Opcode::from_token`] maps unassigned tokens to
/// [`Opcode::Nop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Cursor movement, circular (wraps modulo tape length)
    /// Move the tape cursor forward by one cell.
    Forward,
    /// Move forward by five cells.
    ForwardFive,
    /// Move forward by ten cells.
    ForwardTen,
    /// Move forward by trunc(N*N) cells, N being the current cell value.
    ForwardSquared,
    /// Move the tape cursor backward by one cell.
    Backward,
    /// Move backward by five cells.
    BackwardFive,
    /// Move backward by ten cells.
    BackwardTen,
    /// Move backward by trunc(N*N) cells.
    BackwardSquared,
    /// Move forward by trunc(N) cells.
    ForwardByCell,
    /// Move backward by trunc(N) cells.
    BackwardByCell,

    // Cursor placement
    /// Place the cursor on the first cell.
    SeekStart,
    /// Place the cursor on the last cell.
    SeekEnd,
    /// Place the cursor on the index given by the last output value
    /// (clamped; zero when the output buffer is empty).
    SeekFromOutput,

    // Accumulation
    /// Add one to the current cell.
    Increment,
    /// Add five.
    AddFive,
    /// Add ten.
    AddTen,
    /// Subtract one from the current cell.
    Decrement,
    /// Subtract five.
    SubFive,
    /// Subtract ten.
    SubTen,
    /// Double the current cell.
    Double,
    /// Halve the current cell.
    Halve,

    // Loop construct
    /// Enter a loop: skip past the matching exit when the current cell is zero.
    LoopEntry,
    /// Close a loop: jump back past the matching entry when the current cell
    /// is non-zero.
    LoopExit,

    // Tape shape
    /// Append one zero cell to the end of the tape.
    GrowOne,
    /// Append ten zero cells.
    GrowTen,
    /// Remove one cell from the end of the tape (the tape never shrinks
    /// below one cell).
    ShrinkOne,
    /// Remove ten cells from the end.
    ShrinkTen,
    /// Insert a zero cell just after the cursor.
    InsertCell,
    /// Delete the cell under the cursor.
    DeleteCell,
    /// Delete the cell under the cursor and append its value to the output
    /// buffer.
    DeleteToOutput,

    // Output buffer
    /// Append the current cell value to the output buffer.
    WriteCell,
    /// Append the cursor index to the output buffer.
    WriteCursor,
    /// Append the current program-counter value to the output buffer.
    WriteCounter,
    /// Replace the current cell with the last output value, removing it.
    PopBack,
    /// Replace the current cell with the last output value, keeping it.
    PeekBack,
    /// Replace the current cell with the first output value, removing it.
    PopFront,
    /// Replace the current cell with the first output value, keeping it.
    PeekFront,
    /// Remove the first output value.
    DropFront,
    /// Remove the last output value.
    DropBack,
    /// Reverse the output buffer.
    ReverseOutput,

    // Input queue
    /// Consume the front of the input queue into the current cell
    /// (zero when the queue is empty).
    ReadInput,
    /// Copy the front of the input queue into the current cell without
    /// consuming it (zero when the queue is empty).
    PeekInput,

    // Program counter
    /// Skip the next instruction when it exists.
    SkipOne,
    /// Skip the next five instructions when they exist.
    SkipFive,
    /// Skip the next ten instructions when they exist.
    SkipTen,
    /// Move the counter back one instruction when possible.
    RewindOne,
    /// Move the counter back five instructions when possible.
    RewindFive,
    /// Move the counter back ten instructions when possible.
    RewindTen,
    /// Skip the next instruction when the current cell is zero.
    SkipIfZero,
    /// Skip trunc(|N|) instructions when they exist.
    SkipByCell,

    // Set value
    /// Set the current cell to zero.
    SetZero,
    /// Set the current cell to minus one.
    SetMinusOne,
    /// Set the current cell to one.
    SetOne,
    /// Set the current cell to pi.
    SetPi,
    /// Set the current cell to Euler's number.
    SetE,

    // Whole-sequence reversal
    /// Reverse the tape; the cursor keeps its index.
    ReverseTape,
    /// Reverse the program tokens; the counter keeps its index.
    ReverseProgram,

    // Tape manipulation
    /// Swap the current cell with the next cell (circular).
    SwapNext,
    /// Reverse the tape suffix after the cursor.
    ReverseSuffix,

    // Arithmetic against the next cell (circular)
    /// cell = cell + next.
    AddNext,
    /// cell = next - cell.
    SubNext,
    /// cell = next * cell.
    MulNext,
    /// cell = next / cell.
    DivNext,
    /// cell = next mod cell (floor convention).
    ModNext,
    /// cell = cell ^ next.
    PowNext,
    /// cell = cell ^ (1 / next).
    RootNext,
    /// cell = sqrt(cell^2 + next^2).
    Hypot,
    /// cell = log base next of cell.
    LogNext,

    // Arithmetic against the input queue (peeked, not consumed; no-op when
    // the queue is empty)
    /// cell = cell + front of input.
    AddInputFront,
    /// cell = cell + back of input.
    AddInputBack,
    /// cell = front of input - cell.
    SubInputFront,
    /// cell = back of input - cell.
    SubInputBack,
    /// cell = front of input * cell.
    MulInputFront,
    /// cell = back of input * cell.
    MulInputBack,
    /// cell = front of input / cell.
    DivInputFront,
    /// cell = back of input / cell.
    DivInputBack,
    /// cell = front of input mod cell.
    ModInputFront,
    /// cell = back of input mod cell.
    ModInputBack,

    // Unary math
    /// Truncate the current cell toward zero.
    Truncate,
    /// Negate the current cell.
    Negate,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// cell = 1 / cell.
    Reciprocal,
    Sqrt,
    /// Natural logarithm.
    Ln,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    /// Convert radians to degrees.
    ToDegrees,
    /// Convert degrees to radians.
    ToRadians,
    /// cell = cell ^ e.
    PowE,
    /// cell = e ^ cell.
    ExpE,
    /// cell = 10 ^ cell.
    ExpTen,
    /// Error function.
    Erf,
    /// Complementary error function.
    Erfc,
    /// Factorial of trunc(cell); rejects negative operands.
    Factorial,
    /// Factorial of |trunc(cell)|.
    FactorialAbs,

    // Logic (truth: value > 0; stores exactly 0 or 1)
    And,
    Or,
    Not,
    Lt,
    Gt,
    Eq,
    Neq,
    Lte,
    Gte,
    Nand,
    Nor,

    // Randomized (injected random source picks one primitive per step)
    /// Increment or move forward, evenly.
    RandIncFwd,
    /// Decrement or move backward, evenly.
    RandDecBack,
    /// Move forward or backward, evenly.
    RandFwdBack,
    /// Increment or decrement, evenly.
    RandIncDec,
    /// Decrement or move forward, evenly.
    RandDecFwd,
    /// Increment or move backward, evenly.
    RandIncBack,
    /// Move forward, decrement, or move backward, evenly.
    RandFwdDecBack,
    /// Increment, decrement, or move forward, evenly.
    RandIncDecFwd,
    /// Increment, decrement, or move backward, evenly.
    RandIncDecBack,
    /// Increment, move forward, or move backward, evenly.
    RandIncFwdBack,
    /// Increment, decrement, move forward, or move backward, evenly.
    RandAny,

    /// Do nothing. Every unassigned token decodes to this.
    Nop,
}

impl Opcode {
    /// Decode a numeric token. Total: unassigned tokens become [`Opcode::Nop`].
    pub fn from_token(token: u16) -> Opcode {
        match token {
            0 => Opcode::Forward,
            1 => Opcode::ForwardFive,
            2 => Opcode::ForwardTen,
            3 => Opcode::ForwardSquared,
            4 => Opcode::Backward,
            5 => Opcode::BackwardFive,
            6 => Opcode::BackwardTen,
            7 => Opcode::BackwardSquared,
            8 => Opcode::Increment,
            9 => Opcode::AddFive,
            10 => Opcode::AddTen,
            11 => Opcode::Decrement,
            12 => Opcode::SubFive,
            13 => Opcode::SubTen,
            14 => Opcode::LoopEntry,
            15 => Opcode::LoopExit,
            16 => Opcode::GrowOne,
            17 => Opcode::GrowTen,
            18 => Opcode::ShrinkOne,
            19 => Opcode::ShrinkTen,
            20 => Opcode::WriteCell,
            21 => Opcode::WriteCursor,
            22 => Opcode::WriteCounter,
            23 => Opcode::SkipOne,
            24 => Opcode::SkipFive,
            25 => Opcode::SkipTen,
            26 => Opcode::RewindOne,
            27 => Opcode::RewindFive,
            28 => Opcode::RewindTen,
            32 => Opcode::Double,
            33 => Opcode::Halve,
            34 => Opcode::InsertCell,
            35 => Opcode::DeleteCell,
            36 => Opcode::DeleteToOutput,
            37 => Opcode::PopBack,
            38 => Opcode::PeekBack,
            39 => Opcode::PopFront,
            40 => Opcode::PeekFront,
            41 => Opcode::DropFront,
            42 => Opcode::DropBack,
            43 => Opcode::SeekStart,
            44 => Opcode::SeekEnd,
            45 => Opcode::SeekFromOutput,
            46 => Opcode::ReverseTape,
            47 => Opcode::ReverseOutput,
            48 => Opcode::ReverseProgram,
            50 => Opcode::RandIncFwd,
            51 => Opcode::RandDecBack,
            52 => Opcode::RandFwdBack,
            53 => Opcode::RandIncDec,
            54 => Opcode::RandDecFwd,
            55 => Opcode::RandIncBack,
            56 => Opcode::RandFwdDecBack,
            57 => Opcode::RandIncDecFwd,
            58 => Opcode::RandIncDecBack,
            59 => Opcode::RandIncFwdBack,
            60 => Opcode::RandAny,
            61 => Opcode::ForwardByCell,
            62 => Opcode::BackwardByCell,
            63 => Opcode::ReadInput,
            64 => Opcode::PeekInput,
            65 => Opcode::AddNext,
            66 => Opcode::AddInputFront,
            67 => Opcode::AddInputBack,
            68 => Opcode::SubNext,
            69 => Opcode::SubInputFront,
            70 => Opcode::SubInputBack,
            71 => Opcode::MulNext,
            72 => Opcode::MulInputFront,
            73 => Opcode::MulInputBack,
            74 => Opcode::DivNext,
            75 => Opcode::DivInputFront,
            76 => Opcode::DivInputBack,
            77 => Opcode::ModNext,
            78 => Opcode::ModInputFront,
            79 => Opcode::ModInputBack,
            80 => Opcode::Truncate,
            81 => Opcode::SwapNext,
            82 => Opcode::SkipIfZero,
            83 => Opcode::SkipByCell,
            84 => Opcode::SetZero,
            85 => Opcode::SetMinusOne,
            86 => Opcode::SetOne,
            87 => Opcode::Negate,
            88 => Opcode::Sin,
            89 => Opcode::Cos,
            90 => Opcode::Tan,
            91 => Opcode::Asin,
            92 => Opcode::Acos,
            93 => Opcode::Atan,
            94 => Opcode::Reciprocal,
            95 => Opcode::Sqrt,
            96 => Opcode::Ln,
            97 => Opcode::SetPi,
            98 => Opcode::SetE,
            99 => Opcode::Sinh,
            100 => Opcode::Cosh,
            101 => Opcode::Tanh,
            102 => Opcode::Asinh,
            103 => Opcode::Acosh,
            104 => Opcode::Atanh,
            105 => Opcode::ToDegrees,
            106 => Opcode::ToRadians,
            107 => Opcode::PowE,
            108 => Opcode::ExpE,
            109 => Opcode::ExpTen,
            110 => Opcode::PowNext,
            111 => Opcode::RootNext,
            112 => Opcode::Erf,
            113 => Opcode::Erfc,
            114 => Opcode::Factorial,
            115 => Opcode::FactorialAbs,
            116 => Opcode::Hypot,
            117 => Opcode::LogNext,
            120 => Opcode::And,
            121 => Opcode::Or,
            122 => Opcode::Not,
            123 => Opcode::Lt,
            124 => Opcode::Gt,
            125 => Opcode::Eq,
            126 => Opcode::Neq,
            127 => Opcode::Lte,
            128 => Opcode::Gte,
            129 => Opcode::Nand,
            130 => Opcode::Nor,
            133 => Opcode::ReverseSuffix,
            _ => Opcode::Nop,
        }
    }
}
