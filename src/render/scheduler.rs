/// Platform hook that arranges for the next frame to be drawn.
pub trait FrameScheduler {
    fn request_frame(&self);

    /// Withdraw an outstanding request, where the platform supports it.
    fn cancel(&self) {}
}

impl FrameScheduler for egui::Context {
    fn request_frame(&self) {
        self.request_repaint();
    }
}

/// Continuous frame loop. While running, every finished frame requests the
/// next one; stopping (or dropping the loop) ends the chain.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    running: bool,
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            running: false,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("Frame loop started");
            self.running = true;
            self.scheduler.request_frame();
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Frame loop stopped after {} frames", self.frames);
            self.running = false;
            self.scheduler.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Call at the end of each drawn frame.
    pub fn frame_finished(&mut self) {
        if self.running {
            self.frames += 1;
            self.scheduler.request_frame();
        }
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
