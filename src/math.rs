use std::iter;

pub trait IteratorAvg: Iterator<Item = f64> {
    fn avg(self) -> Option<f64>;
}

impl<I> IteratorAvg for I
where
    I: Iterator<Item = f64>,
{
    fn avg(self) -> Option<f64> {
        iter::zip(self, 1usize..)
            .reduce(|(sum, _), (next, cnt)| (sum + next, cnt))
            .map(|(sum, cnt)| sum / cnt as f64)
    }
}
