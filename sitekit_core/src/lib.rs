// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Building blocks for maintaining the KubeGraf website: image generation
//! and in-place patching of the docs HTML.
pub mod error;
pub mod favicon;
pub mod file_io;
pub mod layout;
pub mod logo;
pub mod og_image;
pub mod patch;
pub mod patches;
pub mod text;
pub mod types;
