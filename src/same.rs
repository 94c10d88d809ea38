use crate::harness::Harness;
use core::fmt;
use pretty_assertions::Comparison;

/// Deep-equality assertion: returns on structural equality, otherwise
/// aborts the enclosing test with a rendered diff. Diff rendering is
/// delegated to `pretty_assertions`.
pub fn equal<H, T>(harness: &H, got: T, want: T)
where
    H: Harness + ?Sized,
    T: PartialEq + fmt::Debug,
{
    harness.helper();
    if got != want {
        harness.fatal(format_args!(
            "mismatch (want != got):\n{}",
            Comparison::new(&want, &got)
        ));
    }
}
