pub(crate) trait Align {
    fn align(&mut self, offset: usize);
}

impl Align for usize {
    #[inline]
    fn align(&mut self, offset: usize) {
        *self -= offset;
    }
}
