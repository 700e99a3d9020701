// R code skeletons, one per visualization kind.
//
// `${name}` slots are filled by the code generator, either from dataset
// columns or from the embedded example bindings. Everything else is emitted
// byte for byte, since users paste it straight into RStudio.

use crate::kind::VisualizationKind;

pub const LINEAR_REGRESSION: &str = r#"${data_frame}

# Fit linear model
model <- lm(
  formula = ${formula},
  data = df,
  subset = NULL,
  weights = NULL,
  na.action = na.omit,
  method = "qr",
  model = TRUE,
  x = FALSE,
  y = TRUE,
  qr = TRUE,
  singular.ok = TRUE,
  contrasts = NULL,
  offset = NULL
)

# Display model summary
summary(model)

# Plot the model
plot(model)"#;

pub const BAR_CHART: &str = r#"# Initialize data
categories <- c(${categories})
values <- c(${values})

# Create data frame
df <- data.frame(
  category = categories,
  value = values
)

# Create bar chart
barplot(
  height = df$value,
  names.arg = df$category,
  main = "${title}",
  xlab = "${x_label}",
  ylab = "${y_label}",
  col = rainbow(length(categories)),
  border = "black"
)"#;

pub const LINE_CHART: &str = r#"# Initialize data
time_points <- c(${time_points})
values <- c(${values})

# Create data frame
df <- data.frame(
  time = time_points,
  value = values
)

# Create line chart
plot(
  x = df$time,
  y = df$value,
  type = "l",
  main = "${title}",
  xlab = "${x_label}",
  ylab = "${y_label}",
  col = "${line_color}",
  lwd = 2,
  pch = 16
)

# Add points
points(df$time, df$value, col = "red", pch = 16)"#;

pub const DOT_PLOT: &str = r#"# Initialize data
x_values <- c(${x_values})
y_values <- c(${y_values})

# Create data frame
df <- data.frame(
  x = x_values,
  y = y_values
)

# Create dot plot / scatter plot
plot(
  x = df$x,
  y = df$y,
  main = "${title}",
  xlab = "${x_label}",
  ylab = "${y_label}",
  pch = 19,
  col = "${point_color}"
)

# Add grid for readability
grid(col = "lightgray")"#;

pub const PIE_CHART: &str = r#"# Define the data vector with ${vector_note}
x <- c(${values})

# Define labels for each value in x
names(x) <- c(${categories})

# Set the output to be a PNG file
png(file = "${output_file}")

# Create the pie chart
pie(x, labels = names(x), col = "${colors}",
    main = "${title}", radius = -1,
    col.main = "${title_color}")

# Save the file
dev.off()"#;

pub const HISTOGRAM: &str = r#"# Initialize data
values <- c(${values})

# Create histogram
hist(
  x = values,
  breaks = "${breaks}",
  main = "${title}",
  xlab = "${x_label}",
  ylab = "${y_label}",
  col = "${fill_color}",
  border = "black"
)"#;

pub const DENSITY_PLOT: &str = r#"# Initialize data
values <- c(${values})

# Estimate the density
d <- density(values)

# Create density plot
plot(
  d,
  main = "${title}",
  xlab = "${x_label}",
  ylab = "${y_label}",
  col = "${line_color}",
  lwd = 2
)

# Shade the area under the curve
polygon(d, col = adjustcolor("${line_color}", alpha.f = 0.3), border = "${line_color}")"#;

pub const BOX_PLOT: &str = r#"# Initialize data
values <- c(${values})

# Create box plot
boxplot(
  values,
  main = "${title}",
  ylab = "${y_label}",
  col = "${fill_color}",
  border = "${border_color}"
)"#;

pub fn template_for(kind: VisualizationKind) -> &'static str {
    match kind {
        VisualizationKind::LinearRegression => LINEAR_REGRESSION,
        VisualizationKind::BarChart => BAR_CHART,
        VisualizationKind::LineChart => LINE_CHART,
        VisualizationKind::DotPlot => DOT_PLOT,
        VisualizationKind::PieChart => PIE_CHART,
        VisualizationKind::Histogram => HISTOGRAM,
        VisualizationKind::DensityPlot => DENSITY_PLOT,
        VisualizationKind::BoxPlot => BOX_PLOT,
    }
}
