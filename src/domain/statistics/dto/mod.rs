pub mod statistics_sequence_dto;
pub mod statistics_source;
pub mod statistics_summary_dto;

pub use statistics_sequence_dto::{
    BillingPointDto, ConnectionPointDto, StatisticsSequenceDto, StatisticsSequenceResponseDto,
};
pub use statistics_source::StatisticsSource;
pub use statistics_summary_dto::StatisticsSummaryDto;
