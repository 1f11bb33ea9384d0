pub mod u501_feedback;
