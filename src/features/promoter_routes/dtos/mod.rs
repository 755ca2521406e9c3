mod route_dto;

pub use route_dto::{
    CompletePointBodyDto, CompletePointDto, CreateRouteDto, PointCompletedDto,
    RouteActionDto, RouteActionResultDto, RouteCreatedDto, RouteDetailDto, RoutePointDto,
    RoutePointInputDto, RouteQueryParams,
};
