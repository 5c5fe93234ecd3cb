//! CSS transform-list parser
//!
//! A small character scanner plus a fixed-arity dispatch table. The
//! grammar is the transform-list subset of CSS: `none`, `matrix(...)`,
//! `matrix3d(...)`, and sequences of individual transform functions
//! separated by whitespace and/or commas, composed left to right by
//! post-multiplication.

use crate::error::TransformError;
use crate::matrix::Matrix;

/// Parse a transform list into a matrix.
///
/// `""` and `none` (case-insensitive) parse to the identity.
pub(crate) fn parse_transform_list(input: &str) -> Result<Matrix, TransformError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(Matrix::IDENTITY);
    }

    let mut scanner = Scanner::new(trimmed);
    let mut matrix = Matrix::IDENTITY;

    scanner.skip_separators();
    while !scanner.eof() {
        let name = scanner.consume_ident()?;
        scanner.skip_whitespace();
        scanner.expect('(')?;
        let args = scanner.consume_args(&name)?;
        log::trace!("transform function `{}` with {} argument(s)", name, args.len());
        matrix = apply_function(&matrix, &name, &args)?;
        scanner.skip_separators();
    }

    Ok(matrix)
}

/// Post-multiply the operation named by a single transform function.
fn apply_function(m: &Matrix, name: &str, args: &[f64]) -> Result<Matrix, TransformError> {
    match name.to_ascii_lowercase().as_str() {
        "matrix" => {
            check_arity(name, args, 6, 6)?;
            let mut op = Matrix::IDENTITY;
            op.m11 = args[0];
            op.m12 = args[1];
            op.m21 = args[2];
            op.m22 = args[3];
            op.m41 = args[4];
            op.m42 = args[5];
            Ok(m.multiply(&op))
        }
        "matrix3d" => {
            check_arity(name, args, 16, 16)?;
            let mut values = [0.0f64; 16];
            values.copy_from_slice(args);
            Ok(m.multiply(&Matrix::from_array(values)))
        }
        "translate" => {
            check_arity(name, args, 1, 2)?;
            let ty = args.get(1).copied().unwrap_or(0.0);
            m.translate(args[0], ty, 0.0)
        }
        "translate3d" => {
            check_arity(name, args, 3, 3)?;
            m.translate(args[0], args[1], args[2])
        }
        "translatex" => {
            check_arity(name, args, 1, 1)?;
            m.translate(args[0], 0.0, 0.0)
        }
        "translatey" => {
            check_arity(name, args, 1, 1)?;
            m.translate(0.0, args[0], 0.0)
        }
        "translatez" => {
            check_arity(name, args, 1, 1)?;
            m.translate(0.0, 0.0, args[0])
        }
        "scale" => {
            check_arity(name, args, 1, 2)?;
            let sy = args.get(1).copied().unwrap_or(args[0]);
            m.scale(args[0], sy, 1.0)
        }
        "scale3d" => {
            check_arity(name, args, 3, 3)?;
            m.scale(args[0], args[1], args[2])
        }
        "scalex" => {
            check_arity(name, args, 1, 1)?;
            m.scale(args[0], 1.0, 1.0)
        }
        "scaley" => {
            check_arity(name, args, 1, 1)?;
            m.scale(1.0, args[0], 1.0)
        }
        "scalez" => {
            check_arity(name, args, 1, 1)?;
            m.scale(1.0, 1.0, args[0])
        }
        // rotate(a) is a z rotation; rotate(rx, ry, rz) is the full Euler
        // form. Two angles are not a valid call pattern.
        "rotate" => match args.len() {
            1 => m.rotate(0.0, 0.0, args[0]),
            3 => m.rotate(args[0], args[1], args[2]),
            n => Err(TransformError::Parse(format!(
                "`{}` expects 1 or 3 arguments, got {}",
                name, n
            ))),
        },
        "rotate3d" => {
            check_arity(name, args, 4, 4)?;
            m.rotate_axis_angle(args[0], args[1], args[2], args[3])
        }
        "rotatex" => {
            check_arity(name, args, 1, 1)?;
            m.rotate(args[0], 0.0, 0.0)
        }
        "rotatey" => {
            check_arity(name, args, 1, 1)?;
            m.rotate(0.0, args[0], 0.0)
        }
        "rotatez" => {
            check_arity(name, args, 1, 1)?;
            m.rotate(0.0, 0.0, args[0])
        }
        "skew" => {
            check_arity(name, args, 1, 2)?;
            let ay = args.get(1).copied().unwrap_or(0.0);
            // skew(ax, ay) is a single shear matrix, not skewX then skewY.
            let mut op = Matrix::IDENTITY;
            op.m21 = args[0].to_radians().tan();
            op.m12 = ay.to_radians().tan();
            Ok(m.multiply(&op))
        }
        "skewx" => {
            check_arity(name, args, 1, 1)?;
            m.skew_x(args[0])
        }
        "skewy" => {
            check_arity(name, args, 1, 1)?;
            m.skew_y(args[0])
        }
        "perspective" => {
            check_arity(name, args, 1, 1)?;
            if args[0] <= 0.0 {
                return Err(TransformError::Parse(format!(
                    "`perspective` requires a positive depth, got {}",
                    args[0]
                )));
            }
            m.perspective(args[0])
        }
        _ => Err(TransformError::Parse(format!(
            "unrecognized transform function `{}`",
            name
        ))),
    }
}

fn check_arity(name: &str, args: &[f64], min: usize, max: usize) -> Result<(), TransformError> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            format!("{}", min)
        } else {
            format!("{} to {}", min, max)
        };
        return Err(TransformError::Parse(format!(
            "`{}` expects {} argument(s), got {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}

/// Character scanner over a transform list.
struct Scanner {
    input: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> char {
        self.input[self.pos]
    }

    fn advance(&mut self) -> char {
        let ch = self.input[self.pos];
        self.pos += 1;
        ch
    }

    fn skip_whitespace(&mut self) {
        while !self.eof() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    /// Skip whitespace and commas between transform functions.
    fn skip_separators(&mut self) {
        while !self.eof() && (self.peek().is_whitespace() || self.peek() == ',') {
            self.advance();
        }
    }

    fn expect(&mut self, ch: char) -> Result<(), TransformError> {
        if self.eof() || self.peek() != ch {
            return Err(TransformError::Parse(format!(
                "expected `{}` at position {}",
                ch, self.pos
            )));
        }
        self.advance();
        Ok(())
    }

    fn consume_ident(&mut self) -> Result<String, TransformError> {
        if self.eof() || !self.peek().is_ascii_alphabetic() {
            return Err(TransformError::Parse(format!(
                "expected a transform function name at position {}",
                self.pos
            )));
        }
        let mut name = String::new();
        while !self.eof() && (self.peek().is_ascii_alphanumeric() || self.peek() == '-') {
            name.push(self.advance());
        }
        Ok(name)
    }

    /// Consume the argument list of a function up to and including `)`.
    /// Arguments are numbers separated by commas and/or whitespace.
    fn consume_args(&mut self, name: &str) -> Result<Vec<f64>, TransformError> {
        let mut args = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eof() {
                return Err(TransformError::Parse(format!(
                    "unterminated argument list for `{}`",
                    name
                )));
            }
            if self.peek() == ')' {
                self.advance();
                return Ok(args);
            }
            args.push(self.consume_number()?);
            self.skip_whitespace();
            if !self.eof() && self.peek() == ',' {
                self.advance();
            }
        }
    }

    /// Consume a numeric literal: optional sign, decimal point, scientific
    /// notation. A trailing unit ident (`px`, `deg`, `%`, ...) is consumed
    /// and ignored; angles are plain degrees.
    fn consume_number(&mut self) -> Result<f64, TransformError> {
        let mut buf = String::new();

        if !self.eof() && (self.peek() == '+' || self.peek() == '-') {
            buf.push(self.advance());
        }
        let mut digits = 0;
        while !self.eof() && self.peek().is_ascii_digit() {
            buf.push(self.advance());
            digits += 1;
        }
        if !self.eof() && self.peek() == '.' {
            buf.push(self.advance());
            while !self.eof() && self.peek().is_ascii_digit() {
                buf.push(self.advance());
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(TransformError::Parse(format!(
                "expected a number at position {}",
                self.pos
            )));
        }

        // Exponent only when `e` is actually followed by digits; a bare
        // `e` belongs to a unit like `em`.
        if !self.eof() && (self.peek() == 'e' || self.peek() == 'E') {
            let mut ahead = self.pos + 1;
            if ahead < self.input.len() && (self.input[ahead] == '+' || self.input[ahead] == '-') {
                ahead += 1;
            }
            if ahead < self.input.len() && self.input[ahead].is_ascii_digit() {
                buf.push(self.advance());
                if self.peek() == '+' || self.peek() == '-' {
                    buf.push(self.advance());
                }
                while !self.eof() && self.peek().is_ascii_digit() {
                    buf.push(self.advance());
                }
            }
        }

        let value: f64 = buf
            .parse()
            .map_err(|_| TransformError::Parse(format!("invalid number `{}`", buf)))?;
        if !value.is_finite() {
            return Err(TransformError::Parse(format!(
                "number `{}` is out of range",
                buf
            )));
        }

        while !self.eof() && (self.peek().is_ascii_alphabetic() || self.peek() == '%') {
            self.advance();
        }

        Ok(value)
    }
}
