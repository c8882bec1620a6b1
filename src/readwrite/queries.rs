use crate::graph::builder::{read_line, read_lines};
use crate::{Config, Error, ErrorKind, Queries, QueriesFormat};
use log::info;

/**
Reads a queries file.

The format is taken from `config.queries_format` or auto-detected from the
first line's field count (see
[QueriesFormat::deduce](enum.QueriesFormat.html#method.deduce)). Flags and
scores are read whenever the format carries them. The distance and count
columns are consumed only in standalone outlier-tools mode, where they
hold the output of an earlier distance run; that mode also requires a
format with a count column. `config.n_queries` caps the number of rows
read.

# Arguments

* `queries_file`: path to a whitespace-separated queries file.
* `config`: format override, numbering and mode settings.

# Examples

```no_run
use dbgdist::{readwrite, Config};
let queries = readwrite::queries::read_queries_file("queries.tsv", &Config::default()).unwrap();
```
*/
pub fn read_queries_file(queries_file: &str, config: &Config) -> Result<Queries, Error> {
    let mut lines = read_lines(queries_file)?;
    let first_line = match lines.next() {
        Some(line) => read_line(line, queries_file)?,
        None => {
            return Err(Error::new(
                ErrorKind::MalformedInput,
                format!("{}: empty queries file", queries_file),
            ))
        }
    };

    let format = match config.queries_format {
        Some(format) => format,
        None => {
            let n_fields = first_line.split_whitespace().count();
            QueriesFormat::deduce(n_fields, config.outlier_tools_mode).ok_or_else(|| {
                Error::new(
                    ErrorKind::MalformedInput,
                    format!(
                        "{}: could not deduce the queries format from {} fields",
                        queries_file, n_fields
                    ),
                )
            })?
        }
    };
    if config.outlier_tools_mode && !format.has_count() {
        return Err(Error::new(
            ErrorKind::MalformedInput,
            format!(
                "{}: outlier tools mode needs 5 or 6 columns, found format \"{}\"",
                queries_file,
                format.description()
            ),
        ));
    }
    info!("reading queries with format: {}", format.description());

    let mut queries = Queries::new(format);
    if config.outlier_tools_mode {
        queries.distances_mut().set_mean_distances(format.has_count());
    }

    let n_queries = config.n_queries.unwrap_or(usize::MAX);
    let mut n = 0;
    let mut line = first_line;
    loop {
        read_query_row(&mut queries, &line, format, config, queries_file, n + 1)?;
        n += 1;
        if n >= n_queries {
            break;
        }
        match lines.next() {
            Some(next) => line = read_line(next, queries_file)?,
            None => break,
        }
    }

    Ok(queries)
}

fn read_query_row(
    queries: &mut Queries,
    line: &str,
    format: QueriesFormat,
    config: &Config,
    file: &str,
    line_number: usize,
) -> Result<(), Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < format.n_fields() {
        return Err(Error::malformed_line(
            file,
            line_number,
            format!(
                "not enough columns ({} required); is the file space-separated?",
                format.n_fields()
            ),
        ));
    }

    let shift = config.queries_one_based as usize;
    let v = parse_vertex(fields[0], shift, file, line_number)?;
    let w = parse_vertex(fields[1], shift, file, line_number)?;
    queries.add_vertices(v, w);

    if let Some(flag_field) = format.flag_field() {
        let flag: i64 = parse_number(fields[flag_field], file, line_number)?;
        queries.add_flag(flag != 0);
    }
    if let Some(score_field) = format.score_field() {
        queries.add_score(parse_number(fields[score_field], file, line_number)?);
    }
    if config.outlier_tools_mode {
        let distance: f64 = parse_number(fields[2], file, line_number)?;
        let count = match format.count_field() {
            Some(count_field) => parse_number::<usize>(fields[count_field], file, line_number)?,
            None => 1,
        };
        queries.add_distance(distance, count);
    }
    Ok(())
}

fn parse_vertex(field: &str, shift: usize, file: &str, line_number: usize) -> Result<usize, Error> {
    field
        .parse::<usize>()
        .ok()
        .and_then(|v| v.checked_sub(shift))
        .ok_or_else(|| {
            Error::malformed_line(file, line_number, format!("invalid vertex id {:?}", field))
        })
}

fn parse_number<T: std::str::FromStr>(
    field: &str,
    file: &str,
    line_number: usize,
) -> Result<T, Error> {
    field.parse::<T>().map_err(|_| {
        Error::malformed_line(file, line_number, format!("invalid numeric field {:?}", field))
    })
}
