// Copyright (c) 2026 matrixdeck contributors

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color256,
    TrueColor,
}
