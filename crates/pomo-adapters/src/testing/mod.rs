mod failing_backend;
mod stub_backend;

pub use failing_backend::FailingAudioBackend;
pub use stub_backend::StubAudioBackend;
