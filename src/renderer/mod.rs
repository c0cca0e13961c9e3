pub mod gst_player;
