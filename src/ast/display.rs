use crate::ast::{precedence, Expr, LOWEST_PRECEDENCE};
use std::fmt;

const SIGNIFICANT_DIGITS: usize = 6;

/// Formats a number with 6 significant digits, like C's `%.6g`.
///
/// Uses exponent notation (`1e+06`, `2.5e-05`) when the decimal exponent is
/// below -4 or at least 6, and drops trailing zeros in either form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the target digits first decides the exponent, so 999999.5 becomes 1e+06.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Whether a multiplicative sub-expression needs parentheses to keep its shape
/// when it is the right operand of another multiplicative operator, or the
/// operand of a sign. Additive operations wrap themselves.
fn needs_grouping(child: &Expr) -> bool {
    matches!(child, Expr::Binary { operator, .. } if precedence(*operator) > LOWEST_PRECEDENCE)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => f.write_str(&format_number(*value)),
            Expr::Variable(name) => f.write_str(name),
            Expr::Unary { operator, operand } => {
                if needs_grouping(operand) {
                    write!(f, "{}({})", operator, operand)
                } else {
                    write!(f, "{}{}", operator, operand)
                }
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let level = precedence(*operator);
                let (open, close) = if level <= LOWEST_PRECEDENCE {
                    ("(", ")")
                } else {
                    ("", "")
                };

                if level > LOWEST_PRECEDENCE && needs_grouping(right) {
                    write!(f, "{}{} {} ({}){}", open, left, operator, right, close)
                } else {
                    write!(f, "{}{} {} {}{}", open, left, operator, right, close)
                }
            }
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (n, arg) in args.iter().enumerate() {
                    if n > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
