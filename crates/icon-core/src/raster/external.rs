use std::ffi::OsString;
use std::path::Path;

use crate::error::IconError;
use crate::raster::{Method, Rasterizer, ensure_size};
use crate::utils::file_ops::{is_non_empty_file, write_file};
use crate::utils::tools::run_tool;

/// The command-line rasterizers, one per external [`Method`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tool {
    RsvgConvert,
    Inkscape,
    ImageMagick,
}

impl Tool {
    /// `None` for methods that render in-process.
    pub(super) fn for_method(method: Method) -> Option<Tool> {
        match method {
            Method::RsvgConvert => Some(Tool::RsvgConvert),
            Method::Inkscape => Some(Tool::Inkscape),
            Method::ImageMagick => Some(Tool::ImageMagick),
            Method::Resvg => None,
        }
    }

    /// Program name looked up on PATH.
    pub(super) fn command(self) -> &'static str {
        match self {
            Tool::RsvgConvert => "rsvg-convert",
            Tool::Inkscape => "inkscape",
            Tool::ImageMagick => "convert",
        }
    }

    fn method(self) -> Method {
        match self {
            Tool::RsvgConvert => Method::RsvgConvert,
            Tool::Inkscape => Method::Inkscape,
            Tool::ImageMagick => Method::ImageMagick,
        }
    }
}

/// Rasterizer backed by a command-line tool.
#[derive(Debug, Clone)]
pub struct ExternalRasterizer {
    tool: Tool,
    program: String,
}

/// Where the tool puts the rendered PNG.
enum Sink {
    /// The tool writes the PNG to stdout.
    Stdout,
    /// The tool writes the output path it was given.
    File,
}

impl ExternalRasterizer {
    /// Returns `None` for methods that don't shell out.
    pub fn new(method: Method) -> Option<Self> {
        let tool = Tool::for_method(method)?;
        Some(ExternalRasterizer {
            tool,
            program: tool.command().to_string(),
        })
    }

    /// Like [`ExternalRasterizer::new`], but runs `program` (a name on PATH
    /// or a path to an executable) instead of the usual command.
    pub fn with_program(method: Method, program: impl Into<String>) -> Option<Self> {
        let tool = Tool::for_method(method)?;
        Some(ExternalRasterizer {
            tool,
            program: program.into(),
        })
    }

    fn command_args(&self, svg: &Path, output: &Path, size: u32) -> (Vec<OsString>, Sink) {
        let size_arg = size.to_string();
        match self.tool {
            Tool::RsvgConvert => (
                vec![
                    "-w".into(),
                    size_arg.clone().into(),
                    "-h".into(),
                    size_arg.into(),
                    svg.into(),
                ],
                Sink::Stdout,
            ),
            Tool::Inkscape => (
                vec![
                    "-w".into(),
                    size_arg.clone().into(),
                    "-h".into(),
                    size_arg.into(),
                    svg.into(),
                    "-o".into(),
                    output.into(),
                ],
                Sink::File,
            ),
            Tool::ImageMagick => (
                vec![
                    "-background".into(),
                    "transparent".into(),
                    "-size".into(),
                    format!("{}x{}", size, size).into(),
                    svg.into(),
                    output.into(),
                ],
                Sink::File,
            ),
        }
    }
}

impl Rasterizer for ExternalRasterizer {
    fn name(&self) -> &str {
        self.tool.method().as_str()
    }

    fn rasterize(&self, svg: &Path, output: &Path, size: u32) -> Result<(), IconError> {
        let (args, sink) = self.command_args(svg, output, size);
        let result = run_tool(&self.program, args)?;

        if let Sink::Stdout = sink {
            if result.stdout.is_empty() {
                return Err(IconError::EmptyOutput(output.to_path_buf()));
            }
            write_file(output, &result.stdout).map_err(|e| IconError::io(output, e))?;
        }

        if !is_non_empty_file(output) {
            return Err(IconError::EmptyOutput(output.to_path_buf()));
        }

        ensure_size(output, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(method: Method, size: u32) -> Vec<String> {
        let (args, _) = ExternalRasterizer::new(method).unwrap().command_args(
            Path::new("build/tutu-logo.svg"),
            Path::new("build/icons/64x64.png"),
            size,
        );
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn rsvg_convert_args() {
        assert_eq!(
            args_of(Method::RsvgConvert, 64),
            ["-w", "64", "-h", "64", "build/tutu-logo.svg"]
        );
    }

    #[test]
    fn inkscape_args() {
        assert_eq!(
            args_of(Method::Inkscape, 64),
            ["-w", "64", "-h", "64", "build/tutu-logo.svg", "-o", "build/icons/64x64.png"]
        );
    }

    #[test]
    fn imagemagick_args() {
        assert_eq!(
            args_of(Method::ImageMagick, 64),
            [
                "-background",
                "transparent",
                "-size",
                "64x64",
                "build/tutu-logo.svg",
                "build/icons/64x64.png"
            ]
        );
    }

    #[test]
    fn name_is_method_name() {
        assert_eq!(ExternalRasterizer::new(Method::ImageMagick).unwrap().name(), "imagemagick");
    }

    #[test]
    fn resvg_is_not_external() {
        assert!(ExternalRasterizer::new(Method::Resvg).is_none());
        assert!(ExternalRasterizer::with_program(Method::Resvg, "resvg").is_none());
    }

    #[test]
    fn tool_round_trips_method() {
        for method in Method::ALL {
            if let Some(tool) = Tool::for_method(method) {
                assert_eq!(tool.method(), method);
                assert_eq!(Some(tool.command()), method.tool());
            }
        }
    }

    #[cfg(unix)]
    mod fake_tools {
        use super::*;
        use image::{Rgba, RgbaImage};
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;
        use tempfile::{TempDir, tempdir};

        /// A 40x20 PNG the fake tools hand back, so every success has to be
        /// resampled.
        fn wrong_size_png(dir: &Path) -> PathBuf {
            let path = dir.join("wrong.png");
            RgbaImage::from_pixel(40, 20, Rgba([255, 107, 107, 255]))
                .save(&path)
                .unwrap();
            path
        }

        /// Write an executable shell script and return its path.
        fn fake_tool(dir: &Path, name: &str, body: &str) -> String {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        /// Fake `rsvg-convert` keyed on the `-w` value: 64 prints the wrong-size
        /// PNG, 32 prints nothing, anything else fails with status 2.
        fn fake_rsvg() -> (TempDir, ExternalRasterizer) {
            let dir = tempdir().unwrap();
            let png = wrong_size_png(dir.path());
            let body = format!(
                "case \"$2\" in\n  64) cat '{}' ;;\n  32) ;;\n  *) echo bad >&2; exit 2 ;;\nesac",
                png.display()
            );
            let program = fake_tool(dir.path(), "rsvg-convert", &body);
            let rasterizer = ExternalRasterizer::with_program(Method::RsvgConvert, program).unwrap();
            (dir, rasterizer)
        }

        #[test]
        fn stdout_is_saved_and_resampled() {
            let (dir, rsvg) = fake_rsvg();
            let output = dir.path().join("icons/64x64.png");

            rsvg.rasterize(Path::new("logo.svg"), &output, 64).unwrap();

            assert_eq!(image::image_dimensions(&output).unwrap(), (64, 64));
        }

        #[test]
        fn empty_stdout_writes_nothing() {
            let (dir, rsvg) = fake_rsvg();
            let output = dir.path().join("empty.png");

            let result = rsvg.rasterize(Path::new("logo.svg"), &output, 32);

            assert!(matches!(result, Err(IconError::EmptyOutput(ref path)) if *path == output));
            assert!(!output.exists());
        }

        #[test]
        fn failing_tool_writes_nothing() {
            let (dir, rsvg) = fake_rsvg();
            let output = dir.path().join("fail.png");

            let result = rsvg.rasterize(Path::new("logo.svg"), &output, 48);

            assert!(matches!(
                result,
                Err(IconError::ToolFailed { exit_code: Some(2), ref stderr, .. }) if stderr.contains("bad")
            ));
            assert!(!output.exists());
        }

        #[test]
        fn file_sink_output_is_resampled() {
            let dir = tempdir().unwrap();
            let png = wrong_size_png(dir.path());
            let program = fake_tool(
                dir.path(),
                "inkscape",
                &format!("cp '{}' \"$7\"", png.display()),
            );
            let inkscape = ExternalRasterizer::with_program(Method::Inkscape, program).unwrap();
            let output = dir.path().join("128x128.png");

            inkscape.rasterize(Path::new("logo.svg"), &output, 128).unwrap();

            assert_eq!(image::image_dimensions(&output).unwrap(), (128, 128));
        }

        #[test]
        fn file_sink_without_output_is_empty() {
            let dir = tempdir().unwrap();
            let program = fake_tool(dir.path(), "inkscape", "exit 0");
            let inkscape = ExternalRasterizer::with_program(Method::Inkscape, program).unwrap();
            let output = dir.path().join("16x16.png");

            let result = inkscape.rasterize(Path::new("logo.svg"), &output, 16);

            assert!(matches!(result, Err(IconError::EmptyOutput(_))));
        }
    }
}
