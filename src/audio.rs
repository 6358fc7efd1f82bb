use rodio::source::SineWave;
use rodio::{OutputStream, Sink};

/// The pitch of the beep tone (concert A).
const BEEP_FREQUENCY_HZ: f32 = 440.0;

/// Simple struct to represent an audio stream, with a sink that is resumed
/// while the machine's sound timer runs and paused otherwise.
pub(crate) struct Audio {
    _stream: OutputStream,
    sink: Sink,
}

impl Audio {
    /// Constructor that returns an [Audio] instance whose source is a
    /// sinewave at the beep pitch, starting paused.  Returns None when no
    /// output device is available, in which case the host simply runs
    /// silent.
    ///
    /// # Arguments
    ///
    /// * `volume` - playback volume from 0 to 100
    pub(crate) fn new(volume: u8) -> Option<Self> {
        let (_stream, stream_handle) = OutputStream::try_default().ok()?;
        let sink = Sink::try_new(&stream_handle).ok()?;
        sink.append(SineWave::new(BEEP_FREQUENCY_HZ));
        sink.set_volume(volume.min(100) as f32 / 100.0);
        sink.pause();
        Some(Audio { _stream, sink })
    }

    /// Resumes playback if the stream is paused
    pub(crate) fn play(&self) {
        self.sink.play();
    }

    /// Pauses playback if the stream is playing
    pub(crate) fn pause(&self) {
        self.sink.pause();
    }

    /// Returns true if the stream is currently paused
    pub(crate) fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }
}
