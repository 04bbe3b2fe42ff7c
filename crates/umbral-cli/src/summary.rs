use std::path::Path;

use console::Style;

use umbral_core::config::JobConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(input: &Path, output: &Path, job: &JobConfig, elapsed: f64) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Umbral Threshold"));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}")
    );
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Parameters"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(format!("{} px", job.threshold.window_size))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Offset"),
        s.value.apply_to(job.threshold.c)
    );
    println!();

    println!("  {}", s.header.apply_to("Execution"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Workers"),
        s.value.apply_to(job.workers)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threads"),
        s.value.apply_to(if job.inner_threads == 0 {
            "auto".to_string()
        } else {
            job.inner_threads.to_string()
        })
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Elapsed"),
        s.value.apply_to(format!("{:.3} s", elapsed))
    );
    println!();
}

pub fn print_info(file: &Path, width: usize, height: usize, min: u8, max: u8, mean: f64) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", width, height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pixel range"),
        s.value.apply_to(format!("{} .. {}", min, max))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mean"),
        s.value.apply_to(format!("{:.2}", mean))
    );
    println!();
}

pub fn print_bench_table(results: &[(usize, f64)]) {
    let s = Styles::new();
    let baseline = results.first().map(|&(_, t)| t).unwrap_or(0.0);

    println!();
    println!("  {}", s.header.apply_to("Scaling"));
    println!(
        "    {:<10}{:<14}{}",
        s.label.apply_to("Workers"),
        s.label.apply_to("Time"),
        s.label.apply_to("Speedup")
    );
    for &(workers, seconds) in results {
        let speedup = if seconds > 0.0 { baseline / seconds } else { 0.0 };
        println!(
            "    {:<10}{:<14}{}",
            s.value.apply_to(workers),
            s.value.apply_to(format!("{:.4} s", seconds)),
            s.value.apply_to(format!("{:.2}x", speedup))
        );
    }
    println!();
}
