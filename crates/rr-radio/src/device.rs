//! Device traits: the only way the communication manager touches the
//! outside world.

/// Broadcast transmitter.
///
/// Fire-and-forget: there is no acknowledgment and no failure mode.  Whether
/// anyone hears the frame is the medium's business.
pub trait Emitter {
    fn send(&mut self, frame: &str);
}

/// Queued receiver.
///
/// Frames are held in delivery order until read or discarded.
pub trait Receiver {
    /// Number of frames waiting.
    fn queue_length(&self) -> usize;

    /// Return the head frame and remove it from the queue.
    fn next_frame(&mut self) -> Option<String>;

    /// Drop the head frame without reading it.
    fn advance_to_next_frame(&mut self);
}

/// The host's time step.
///
/// Blocks until the host has advanced one tick of `time_step_ms`.  This is
/// the only suspension point in the whole send/receive path.
pub trait Stepper {
    fn step(&mut self, time_step_ms: u32);
}

/// Everything a communication manager needs from one robot.
pub trait Device: Emitter + Receiver + Stepper {}

impl<T: Emitter + Receiver + Stepper> Device for T {}
