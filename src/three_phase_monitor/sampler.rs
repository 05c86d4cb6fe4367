use super::types::Phase;

/// Selects which phase the converters read next.
///
/// Only one channel is switched per read, so the phases are never sampled at
/// the same instant and each gets roughly a third of the tick rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinSampler {
    channel: Phase,
}

impl RoundRobinSampler {
    pub fn current(&self) -> Phase {
        self.channel
    }

    /// Returns the phase to read now and moves on to the next one.
    pub fn advance(&mut self) -> Phase {
        let phase = self.channel;
        self.channel = phase.next();
        phase
    }

    pub fn reset(&mut self) {
        self.channel = Phase::L1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_channels_zero_one_two_repeatedly() {
        let mut sampler = RoundRobinSampler::default();
        let visited: Vec<usize> = (0..7).map(|_| sampler.advance().index()).collect();

        assert_eq!(visited, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(sampler.current(), Phase::L2);
    }

    #[test]
    fn reset_returns_to_first_phase() {
        let mut sampler = RoundRobinSampler::default();
        sampler.advance();
        sampler.reset();
        assert_eq!(sampler.current(), Phase::L1);
    }
}
