//! Forward/backward filling of absent bar fields.

use shiftlabel_types::PriceBar;

/// Fills absent OHLCV fields in place.
///
/// Each field is forward-filled from the last present value, then leading
/// gaps are back-filled from the first present value. A field that is absent
/// in every bar stays absent. Returns the number of cells filled.
pub fn fill_missing(bars: &mut [PriceBar]) -> usize {
    fill_field(bars, |b| &mut b.open)
        + fill_field(bars, |b| &mut b.high)
        + fill_field(bars, |b| &mut b.low)
        + fill_field(bars, |b| &mut b.close)
        + fill_field(bars, |b| &mut b.volume)
}

fn fill_field<F>(bars: &mut [PriceBar], field: F) -> usize
where
    F: Fn(&mut PriceBar) -> &mut Option<f64>,
{
    let mut filled = 0;

    let mut last = None;
    for bar in bars.iter_mut() {
        let cell = field(bar);
        match *cell {
            Some(value) => last = Some(value),
            None if last.is_some() => {
                *cell = last;
                filled += 1;
            }
            None => {}
        }
    }

    let mut next = None;
    for bar in bars.iter_mut().rev() {
        let cell = field(bar);
        match *cell {
            Some(value) => next = Some(value),
            None if next.is_some() => {
                *cell = next;
                filled += 1;
            }
            None => {}
        }
    }

    filled
}
