#[derive(Debug)]
pub struct Score {
    value: u32,
    increment: u32,
}

impl Score {
    pub fn new(increment: u32) -> Self {
        Score { value: 0, increment }
    }

    pub fn increment(&mut self) {
        self.value += self.increment;
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}
