pub mod gad7;
pub mod pc_ptsd5;
pub mod phq9;
